//! JSON export of an analysed package

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::model::{Function, Package, Parameter};
use indexmap::IndexMap;
use serde::Serialize;

fn no_slots(slots: &&[Parameter]) -> bool {
    slots.is_empty()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRecord<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "no_slots")]
    pub params: &'a [Parameter],
    #[serde(skip_serializing_if = "no_slots")]
    pub returns: &'a [Parameter],
}

impl<'a> From<&'a Function> for FunctionRecord<'a> {
    fn from(function: &'a Function) -> Self {
        Self {
            name: &function.name,
            params: &function.signature.params,
            returns: &function.signature.returns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceRecord<'a> {
    pub name: &'a str,
    pub methods: Vec<FunctionRecord<'a>>,
    pub implementations: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructRecord<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<FunctionRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<FunctionRecord<'a>>,
}

/// The exported view of a [`Package`]; empty mappings are left out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDocument<'a> {
    pub name: &'a str,
    pub path: &'a str,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub interfaces: IndexMap<&'a str, InterfaceRecord<'a>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub structs: IndexMap<&'a str, StructRecord<'a>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub functions: IndexMap<&'a str, FunctionRecord<'a>>,
}

impl<'a> PackageDocument<'a> {
    pub fn new(package: &'a Package) -> Self {
        let interfaces = package
            .interfaces()
            .map(|interface| {
                let record = InterfaceRecord {
                    name: &interface.name,
                    methods: interface.methods.iter().map(FunctionRecord::from).collect(),
                    implementations: interface.implementations(),
                };
                (interface.name.as_str(), record)
            })
            .collect();

        let structs = package
            .concrete_types()
            .map(|concrete| {
                let record = StructRecord {
                    name: &concrete.name,
                    methods: package
                        .methods_of(concrete)
                        .map(|method| FunctionRecord::from(&method.function))
                        .collect(),
                    constructor: concrete.constructor().map(FunctionRecord::from),
                };
                (concrete.name.as_str(), record)
            })
            .collect();

        let functions = package
            .functions()
            .map(|function| (function.name.as_str(), FunctionRecord::from(function)))
            .collect();

        Self {
            name: &package.name,
            path: &package.path,
            interfaces,
            structs,
            functions,
        }
    }
}

impl Package {
    pub fn document(&self) -> PackageDocument<'_> {
        PackageDocument::new(self)
    }

    /// Pretty-printed JSON document of the package
    pub fn to_json(&self) -> AnalyzerResult<String> {
        serde_json::to_string_pretty(&self.document()).map_err(AnalyzerError::render)
    }
}
