//! Serializable view of the generated IR.

use serde::Serialize;
use winmdgen::generator::{GenData, GenFunc, GenParam, GenType, ParamName};

use crate::output::{Align, TabWriter};

#[derive(Debug, Serialize)]
pub struct ParamEntry {
    name: Option<String>,
    #[serde(rename = "type")]
    type_name: String,
    supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FuncEntry {
    name: String,
    constructor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    declaring_type: Option<String>,
    params: Vec<ParamEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    returns: Option<ParamEntry>,
}

#[derive(Debug, Serialize)]
pub struct TypeEntry {
    name: String,
    kind: String,
    guid: Option<String>,
    funcs: Vec<FuncEntry>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    class: String,
    package: String,
    imports: Vec<String>,
    types: Vec<TypeEntry>,
    diagnostics: Vec<String>,
}

impl From<&GenParam> for ParamEntry {
    fn from(param: &GenParam) -> Self {
        ParamEntry {
            name: match &param.name {
                ParamName::Resolved(name) => Some(name.clone()),
                ParamName::Unresolved => None,
            },
            type_name: param.type_name.to_string(),
            supported: !param.type_name.is_unsupported(),
            default: param.default_value.as_ref().map(ToString::to_string),
        }
    }
}

impl From<&GenFunc> for FuncEntry {
    fn from(func: &GenFunc) -> Self {
        FuncEntry {
            name: func.name.clone(),
            constructor: func.is_constructor,
            declaring_type: func.declaring_type.clone(),
            params: func.in_params.iter().map(ParamEntry::from).collect(),
            returns: func.return_param.as_ref().map(ParamEntry::from),
        }
    }
}

impl From<&GenType> for TypeEntry {
    fn from(gen_type: &GenType) -> Self {
        TypeEntry {
            name: gen_type.name.clone(),
            kind: gen_type.kind.to_string(),
            guid: gen_type.guid.clone(),
            funcs: gen_type.funcs.iter().map(FuncEntry::from).collect(),
        }
    }
}

impl GenerateOutput {
    pub fn new(class: &str, data: &GenData) -> Self {
        GenerateOutput {
            class: class.to_string(),
            package: data.package.clone(),
            imports: data.imports.clone(),
            types: data.types.iter().map(TypeEntry::from).collect(),
            diagnostics: data.diagnostics.iter().map(ToString::to_string).collect(),
        }
    }

    /// Human-readable rendering, one line per entry.
    pub fn text(&self) -> Vec<String> {
        let mut lines = vec![format!("{} (package {})", self.class, self.package)];

        if !self.imports.is_empty() {
            lines.push(String::new());
            lines.push("Imports:".to_string());
            lines.extend(self.imports.iter().map(|import| format!("  {import}")));
        }

        for gen_type in &self.types {
            lines.push(String::new());
            lines.push(format!(
                "{} {} {{{}}}",
                gen_type.kind,
                gen_type.name,
                gen_type.guid.as_deref().unwrap_or("no guid")
            ));

            if gen_type.funcs.is_empty() {
                lines.push("  (no methods)".to_string());
                continue;
            }

            let mut writer =
                TabWriter::new(vec![("METHOD", Align::Left), ("SIGNATURE", Align::Left)])
                    .indent("  ");
            for func in &gen_type.funcs {
                writer.row(vec![func.name.clone(), func.signature()]);
            }
            lines.extend(writer.lines());
        }

        if !self.diagnostics.is_empty() {
            lines.push(String::new());
            lines.push(format!("Diagnostics ({}):", self.diagnostics.len()));
            lines.extend(self.diagnostics.iter().map(|d| format!("  {d}")));
        }

        lines
    }
}

impl FuncEntry {
    fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|param| {
                format!(
                    "{} {}",
                    param.name.as_deref().unwrap_or("?"),
                    param.type_name
                )
            })
            .collect();

        match &self.returns {
            Some(ret) => format!("({}) {}", params.join(", "), ret.type_name),
            None => format!("({})", params.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winmdgen::{
        generate,
        metadata::{
            signatures::{SignatureMethod, SignatureParameter, TypeSignature},
            tables::ParamAttributes,
        },
        GeneratorConfig, MetadataBuilder,
    };

    fn sample() -> GenData {
        let mut builder = MetadataBuilder::new("Windows.Storage.Streams.winmd");
        builder.add_runtime_class("Windows.Storage.Streams", "Buffer");
        let interface = builder.add_interface("Windows.Storage.Streams", "IBuffer");
        builder
            .add_method(
                interface,
                "put_Length",
                SignatureMethod {
                    has_this: true,
                    param_count: 1,
                    return_type: SignatureParameter::new(TypeSignature::Void),
                    params: vec![SignatureParameter::new(TypeSignature::U4)],
                    ..Default::default()
                },
                &[("value", ParamAttributes::IN)],
            )
            .unwrap();

        let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer")
            .with_container_bytes("streams.winmd", builder.build().unwrap());
        generate(&config).unwrap()
    }

    #[test]
    fn json_layout() {
        let output = GenerateOutput::new("Windows.Storage.Streams.Buffer", &sample());
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["package"], "buffer");
        assert_eq!(json["types"][0]["kind"], "interface");
        assert!(json["types"][0]["guid"].is_null());

        let func = &json["types"][0]["funcs"][0];
        assert_eq!(func["name"], "put_Length");
        assert_eq!(func["params"][0]["name"], "value");
        assert_eq!(func["params"][0]["type"], "uint32");
        assert!(func.get("returns").is_none());
        assert!(func.get("declaring_type").is_some());

        assert_eq!(json["diagnostics"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn text_layout() {
        let output = GenerateOutput::new("Windows.Storage.Streams.Buffer", &sample());
        let lines = output.text();

        assert_eq!(lines[0], "Windows.Storage.Streams.Buffer (package buffer)");
        assert!(lines.contains(&"interface IBuffer {no guid}".to_string()));
        assert!(lines
            .iter()
            .any(|line| line.contains("put_Length") && line.contains("(value uint32)")));
        assert!(lines.contains(&"Diagnostics (1):".to_string()));
    }
}
