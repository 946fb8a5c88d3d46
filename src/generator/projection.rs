//! Projection of signature elements to target type names and zero literals.

use crate::{
    generator::{config::GeneratorConfig, ir::Projection, naming},
    metadata::{signatures::TypeSignature, winmd::WinMd},
};

/// Projects signature elements into the type system of one generated package.
///
/// Class references to interfaces of other packages are qualified with the package name and
/// register an import, each import once.
pub struct TypeProjector<'a> {
    winmd: &'a WinMd,
    config: &'a GeneratorConfig,
    package: String,
    imports: Vec<String>,
}

impl<'a> TypeProjector<'a> {
    /// A projector for types used from `package`
    #[must_use]
    pub fn new(winmd: &'a WinMd, config: &'a GeneratorConfig, package: impl Into<String>) -> Self {
        TypeProjector {
            winmd,
            config,
            package: package.into(),
            imports: Vec::new(),
        }
    }

    /// The metadata the projected elements come from
    #[must_use]
    pub fn winmd(&self) -> &'a WinMd {
        self.winmd
    }

    /// The package types are projected into
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Imports registered so far
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Consume the projector, returning its imports
    #[must_use]
    pub fn into_imports(self) -> Vec<String> {
        self.imports
    }

    /// The target type name of `element`.
    ///
    /// | Element | Type |
    /// |---------|------|
    /// | `Boolean` | `bool` |
    /// | `Char` | `byte` |
    /// | `I1` .. `U8` | `int8` .. `uint64` |
    /// | `R4`, `R8` | `float32`, `float64` |
    /// | `String` | `string` |
    /// | `Class` | `*IName` or `*pkg.IName` |
    pub fn type_name(&mut self, element: &TypeSignature) -> Projection {
        let name = match element {
            TypeSignature::Boolean => "bool",
            TypeSignature::Char => "byte",
            TypeSignature::I1 => "int8",
            TypeSignature::U1 => "uint8",
            TypeSignature::I2 => "int16",
            TypeSignature::U2 => "uint16",
            TypeSignature::I4 => "int32",
            TypeSignature::U4 => "uint32",
            TypeSignature::I8 => "int64",
            TypeSignature::U8 => "uint64",
            TypeSignature::R4 => "float32",
            TypeSignature::R8 => "float64",
            TypeSignature::String => "string",
            TypeSignature::Class(token) => {
                let winmd = self.winmd;
                let Ok((namespace, name)) = winmd.type_name(*token) else {
                    return Projection::Unsupported(element.kind_name());
                };

                return Projection::Resolved(self.class_reference(namespace, name));
            }
            _ => return Projection::Unsupported(element.kind_name()),
        };

        Projection::Resolved(name.to_string())
    }

    /// The zero literal of `element`'s type.
    ///
    /// Unsupported exactly when [`TypeProjector::type_name`] is, including class references
    /// that cannot be named.
    #[must_use]
    pub fn default_value(&self, element: &TypeSignature) -> Projection {
        let literal = match element {
            TypeSignature::Boolean => "false",
            TypeSignature::Char
            | TypeSignature::I1
            | TypeSignature::U1
            | TypeSignature::I2
            | TypeSignature::U2
            | TypeSignature::I4
            | TypeSignature::U4
            | TypeSignature::I8
            | TypeSignature::U8 => "0",
            TypeSignature::R4 | TypeSignature::R8 => "0.0",
            TypeSignature::String => "\"\"",
            TypeSignature::Class(token) if self.winmd.type_name(*token).is_ok() => "nil",
            _ => return Projection::Unsupported(element.kind_name()),
        };

        Projection::Resolved(literal.to_string())
    }

    fn class_reference(&mut self, namespace: &str, name: &str) -> String {
        let interface = naming::interface_name_for_reference(name);
        let package = naming::interface_package(&interface);

        if package == self.package {
            return format!("*{interface}");
        }

        let defining_type = interface.strip_prefix('I').unwrap_or(&interface);
        let import = self.config.import_path(namespace, defining_type);
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }

        format!("*{package}.{interface}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{builder::MetadataBuilder, token::Token},
        test::buffer_fixture,
    };

    fn resolved(text: &str) -> Projection {
        Projection::Resolved(text.to_string())
    }

    #[test]
    fn scalars() {
        let winmd = WinMd::from_mem("fixture", buffer_fixture()).unwrap();
        let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer");
        let mut projector = TypeProjector::new(&winmd, &config, "buffer");

        let cases = [
            (TypeSignature::Boolean, "bool", "false"),
            (TypeSignature::Char, "byte", "0"),
            (TypeSignature::I1, "int8", "0"),
            (TypeSignature::U1, "uint8", "0"),
            (TypeSignature::I2, "int16", "0"),
            (TypeSignature::U2, "uint16", "0"),
            (TypeSignature::I4, "int32", "0"),
            (TypeSignature::U4, "uint32", "0"),
            (TypeSignature::I8, "int64", "0"),
            (TypeSignature::U8, "uint64", "0"),
            (TypeSignature::R4, "float32", "0.0"),
            (TypeSignature::R8, "float64", "0.0"),
            (TypeSignature::String, "string", "\"\""),
        ];

        for (element, type_name, default) in cases {
            assert_eq!(projector.type_name(&element), resolved(type_name));
            assert_eq!(projector.default_value(&element), resolved(default));
        }

        assert!(projector.imports().is_empty());
    }

    #[test]
    fn unsupported_kinds() {
        let winmd = WinMd::from_mem("fixture", buffer_fixture()).unwrap();
        let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer");
        let mut projector = TypeProjector::new(&winmd, &config, "buffer");

        let cases = [
            (TypeSignature::Object, "ELEMENT_TYPE_OBJECT"),
            (TypeSignature::Void, "ELEMENT_TYPE_VOID"),
            (TypeSignature::ValueType(Token::new(0x0200_0001)), "ELEMENT_TYPE_VALUETYPE"),
            (
                TypeSignature::SzArray(Box::new(TypeSignature::U1)),
                "ELEMENT_TYPE_SZARRAY",
            ),
            (TypeSignature::GenericParamType(0), "ELEMENT_TYPE_VAR"),
        ];

        for (element, kind) in cases {
            assert_eq!(projector.type_name(&element), Projection::Unsupported(kind));
            assert_eq!(projector.default_value(&element), Projection::Unsupported(kind));
        }

        // A TypeSpec cannot be named
        let generic = TypeSignature::Class(Token::new(0x1B00_0001));
        assert_eq!(
            projector.type_name(&generic),
            Projection::Unsupported("ELEMENT_TYPE_CLASS")
        );
        assert_eq!(
            projector.default_value(&generic),
            Projection::Unsupported("ELEMENT_TYPE_CLASS")
        );
    }

    #[test]
    fn class_references() {
        let mut builder = MetadataBuilder::new("Sample");
        let buffer = builder.add_runtime_class("Windows.Storage.Streams", "Buffer");
        let ibuffer = builder.add_interface("Windows.Storage.Streams", "IBuffer");
        let memory_buffer = builder.type_ref("Windows.Foundation", "IMemoryBuffer");
        let uri = builder.type_ref("Windows.Foundation", "Uri");

        let winmd = WinMd::from_mem("sample", builder.build().unwrap()).unwrap();
        let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer");
        let mut projector = TypeProjector::new(&winmd, &config, "buffer");

        // The class itself projects to its primary interface
        assert_eq!(
            projector.type_name(&TypeSignature::Class(buffer)),
            resolved("*IBuffer")
        );
        assert_eq!(
            projector.type_name(&TypeSignature::Class(ibuffer)),
            resolved("*IBuffer")
        );
        assert!(projector.imports().is_empty());

        assert_eq!(
            projector.type_name(&TypeSignature::Class(memory_buffer)),
            resolved("*memorybuffer.IMemoryBuffer")
        );
        assert_eq!(
            projector.default_value(&TypeSignature::Class(memory_buffer)),
            resolved("nil")
        );
        assert_eq!(
            projector.type_name(&TypeSignature::Class(uri)),
            resolved("*uri.IUri")
        );
        assert_eq!(
            projector.type_name(&TypeSignature::Class(memory_buffer)),
            resolved("*memorybuffer.IMemoryBuffer")
        );

        assert_eq!(
            projector.into_imports(),
            vec![
                "github.com/saltosystems/winrt-go/windows/foundation/memorybuffer".to_string(),
                "github.com/saltosystems/winrt-go/windows/foundation/uri".to_string(),
            ]
        );
    }
}
