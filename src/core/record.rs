//! The structural record: per-file facts produced by a fact extractor.
//!
//! Every field is part of a fixed, explicit schema. Optional facts are
//! explicit defaults (empty vectors, `None`), never missing keys, so the
//! aggregation engine never has to probe for a field's presence.

use serde::{Deserialize, Serialize};

/// Structural facts extracted from one script file.
///
/// A record with `error: Some(_)` counts toward the failure tally only; its
/// remaining fields are considered unreliable and must never enter a numeric
/// aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralRecord {
    /// Unique identifier, stable across the run.
    pub path: String,
    /// `class_name` declaration, if any.
    pub class_name: Option<String>,
    /// `extends` target, if any.
    pub extends: Option<String>,
    pub methods: Vec<MethodInfo>,
    pub properties: Vec<PropertyInfo>,
    pub constants: Vec<ConstantInfo>,
    pub signals: Vec<SignalInfo>,
    pub groups: Vec<GroupInfo>,
    pub cross_file_calls: Vec<CrossFileCall>,
    pub node_references: Vec<NodeReference>,
    pub connections: Vec<SignalConnection>,
    pub external_resources: Vec<ExternalResource>,
    pub object_method_calls: Vec<ObjectMethodCall>,
    pub builtin_overrides: Vec<BuiltinOverride>,
    /// Extraction failure message; `None` on success.
    pub error: Option<String>,
}

impl StructuralRecord {
    /// Create an empty successful record for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a failed record carrying the extraction error message.
    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Whether extraction succeeded for this record.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Whether the script declares no class name.
    pub fn is_unnamed(&self) -> bool {
        self.class_name.as_deref().map_or(true, str::is_empty)
    }
}

/// Method visibility as GDScript convention has it (leading underscore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Scope of a property declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclScope {
    /// Script-level declaration, visible to the whole file.
    #[default]
    Global,
    /// Declared inside a method body.
    Local,
}

/// Kind of call that crosses file boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    /// `preload(...)` or `load(...)`.
    #[serde(rename = "preload/load")]
    Load,
    /// `Scene.instantiate()` / `Class.new()`.
    #[serde(rename = "instance_creation")]
    InstanceCreation,
    /// Any other inter-file call; ignored by the reference graph.
    #[serde(rename = "method_call")]
    MethodCall,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodInfo {
    pub name: String,
    pub signature: String,
    pub line: u32,
    pub visibility: Visibility,
    pub is_override: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyInfo {
    pub name: String,
    pub type_name: String,
    pub default_value: String,
    pub exported: bool,
    pub onready: bool,
    pub scope: DeclScope,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantInfo {
    pub name: String,
    pub value: String,
    pub line: u32,
    pub is_enum: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalInfo {
    pub name: String,
    pub args: Vec<String>,
    pub line: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupInfo {
    pub name: String,
    pub line: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossFileCall {
    pub target: String,
    pub kind: CallKind,
    pub line: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeReference {
    pub node_path: String,
    pub line: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConnection {
    pub signal: String,
    pub target: String,
    pub method: String,
    pub line: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalResource {
    pub path: String,
    pub resource_type: String,
    pub line: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMethodCall {
    pub object: String,
    pub method: String,
    pub line: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinOverride {
    pub name: String,
    pub line: u32,
}
