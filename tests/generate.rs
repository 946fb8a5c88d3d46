//! End to end generation over in-memory containers and `.winmd` files on disk.

use std::fs;

use winmdgen::{
    generator::{guid_from_blob, Diagnostic, MethodFilter, ParamName, Projection},
    metadata::{
        signatures::{SignatureMethod, SignatureParameter, TypeSignature},
        tables::{ParamAttributes, TypeAttributes},
    },
    generate, Error, GenTypeKind, GeneratorConfig, MetadataBuilder, Result,
};

const FOUNDATION: &str = "Windows.Foundation";
const STREAMS: &str = "Windows.Storage.Streams";

fn method(params: Vec<TypeSignature>, return_type: TypeSignature) -> SignatureMethod {
    SignatureMethod {
        has_this: true,
        param_count: params.len() as u32,
        return_type: SignatureParameter::new(return_type),
        params: params.into_iter().map(SignatureParameter::new).collect(),
        ..Default::default()
    }
}

fn guid(text: &str) -> uguid::Guid {
    uguid::Guid::try_parse(text).unwrap()
}

/// `Windows.Foundation.MemoryBuffer` with a primary and a factory interface
fn foundation() -> Result<MetadataBuilder> {
    let mut builder = MetadataBuilder::new("Windows.Foundation.winmd");

    let class = builder.add_runtime_class(FOUNDATION, "MemoryBuffer");
    let primary = builder.add_interface(FOUNDATION, "IMemoryBuffer");
    builder.add_method(
        primary,
        "CreateReference",
        method(vec![], TypeSignature::Object),
        &[],
    )?;
    builder.add_guid(primary, guid("fbc4dd2a-245b-11e4-af98-689423260cf8"))?;

    let factory = builder.add_interface(FOUNDATION, "IMemoryBufferFactory");
    builder.add_method(
        factory,
        "Create",
        method(vec![TypeSignature::U4], TypeSignature::Class(class)),
        &[("capacity", ParamAttributes::IN)],
    )?;
    builder.add_guid(factory, guid("fbc4dd2b-245b-11e4-af98-689423260cf8"))?;

    Ok(builder)
}

/// `Windows.Storage.Streams.DataReader`, with an interface the class does not own and a
/// plain type that is not a runtime class
fn streams() -> Result<MetadataBuilder> {
    let mut builder = MetadataBuilder::new("Windows.Storage.Streams.winmd");

    builder.add_runtime_class(STREAMS, "DataReader");
    let primary = builder.add_interface(STREAMS, "IDataReader");
    builder.add_method(
        primary,
        "ReadBoolean",
        method(vec![], TypeSignature::Boolean),
        &[],
    )?;
    builder.add_method(
        primary,
        "ReadString",
        method(vec![TypeSignature::U4], TypeSignature::String),
        &[("codeUnitCount", ParamAttributes::IN)],
    )?;
    builder.add_method(
        primary,
        "ReadDouble",
        method(vec![], TypeSignature::R8),
        &[],
    )?;
    builder.add_guid(primary, guid("e2b50029-b4c1-4314-a4b8-fb813a2f275e"))?;

    let memory_buffer = builder.type_ref(FOUNDATION, "IMemoryBuffer");
    let statics = builder.add_interface(STREAMS, "IDataReaderStatics");
    builder.add_method(
        statics,
        "FromBuffer",
        method(
            vec![TypeSignature::Class(memory_buffer)],
            TypeSignature::Class(primary),
        ),
        &[("buffer", ParamAttributes::IN)],
    )?;
    builder.add_guid(statics, guid("11fcbfc8-f93a-471b-b121-f379e349313c"))?;

    let factory = builder.add_interface(STREAMS, "IDataReaderFactory");
    builder.add_method(
        factory,
        "CreateDataReader",
        method(
            vec![TypeSignature::Class(memory_buffer)],
            TypeSignature::Class(primary),
        ),
        &[("inputStream", ParamAttributes::IN)],
    )?;
    builder.add_guid(factory, guid("d7527847-57da-4e15-914c-06806699a098"))?;

    builder.add_type(
        STREAMS,
        "DataWriter",
        TypeAttributes::PUBLIC | TypeAttributes::SEALED,
        None,
    );
    builder.add_interface(STREAMS, "IDataWriter");

    Ok(builder)
}

fn in_memory(class: &str) -> Result<GeneratorConfig> {
    Ok(GeneratorConfig::new(class)
        .with_container_bytes("Windows.Foundation.winmd", foundation()?.build()?)
        .with_container_bytes("Windows.Storage.Streams.winmd", streams()?.build()?))
}

#[test]
fn class_in_first_container() -> Result<()> {
    let data = generate(&in_memory("Windows.Foundation.MemoryBuffer")?)?;

    assert_eq!(data.package, "memorybuffer");
    assert_eq!(data.types.len(), 2);
    assert!(data.imports.is_empty());

    let factory = data.type_of_kind(GenTypeKind::Factory).unwrap();
    assert_eq!(factory.name, "IMemoryBufferFactory");
    assert_eq!(
        factory.guid.as_deref(),
        Some("fbc4dd2b-245b-11e4-af98-689423260cf8")
    );

    let names: Vec<&str> = factory.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["ActivateMemoryBuffer", "Create"]);

    let create = &factory.funcs[1];
    assert_eq!(
        create.in_params[0].name,
        ParamName::Resolved("capacity".to_string())
    );
    assert_eq!(
        create.return_param.as_ref().unwrap().type_name,
        Projection::Resolved("*IMemoryBuffer".to_string())
    );

    // IMemoryBuffer.CreateReference returns an object
    assert_eq!(
        data.diagnostics,
        vec![Diagnostic::UnsupportedElement {
            context: "IMemoryBuffer.CreateReference return".to_string(),
            kind: "ELEMENT_TYPE_OBJECT",
        }]
    );

    Ok(())
}

#[test]
fn class_in_second_container() -> Result<()> {
    let data = generate(&in_memory("Windows.Storage.Streams.DataReader")?)?;

    assert_eq!(data.package, "datareader");
    assert!(data.diagnostics.is_empty());

    let kinds: Vec<GenTypeKind> = data.types.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            GenTypeKind::Interface,
            GenTypeKind::Factory,
            GenTypeKind::Statics
        ]
    );

    let interface = &data.types[0];
    let returns: Vec<(String, String)> = interface
        .funcs
        .iter()
        .map(|func| {
            let ret = func.return_param.as_ref().unwrap();
            (
                ret.type_name.to_string(),
                ret.default_value.as_ref().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        returns,
        vec![
            ("bool".to_string(), "false".to_string()),
            ("string".to_string(), "\"\"".to_string()),
            ("float64".to_string(), "0.0".to_string()),
        ]
    );

    let statics = data.type_of_kind(GenTypeKind::Statics).unwrap();
    assert_eq!(
        statics.funcs[0].in_params[0].type_name,
        Projection::Resolved("*memorybuffer.IMemoryBuffer".to_string())
    );

    // Referenced from both the factory and the statics, imported once
    assert_eq!(
        data.imports,
        vec!["github.com/saltosystems/winrt-go/windows/foundation/memorybuffer".to_string()]
    );

    Ok(())
}

#[test]
fn failures() -> Result<()> {
    let missing = generate(&in_memory("Windows.Foundation.Uri")?);
    assert!(matches!(missing, Err(Error::ClassNotFound(name)) if name == "Windows.Foundation.Uri"));

    let plain = generate(&in_memory("Windows.Storage.Streams.DataWriter")?);
    assert!(matches!(
        plain,
        Err(Error::NotARuntimeClass(name)) if name == "Windows.Storage.Streams.DataWriter"
    ));

    let unqualified = generate(&in_memory("DataReader")?);
    assert!(matches!(unqualified, Err(Error::Config(_))));

    Ok(())
}

#[test]
fn options() -> Result<()> {
    let config = in_memory("Windows.Storage.Streams.DataReader")?
        .with_skip_factory(true)
        .with_method_filter("!ReadString".parse()?)
        .with_method_filter(MethodFilter::exclude("FromBuffer"));
    let data = generate(&config)?;

    assert!(data.type_of_kind(GenTypeKind::Factory).is_none());
    assert!(data
        .types
        .iter()
        .flat_map(|t| &t.funcs)
        .all(|func| func.name != "ReadString" && func.name != "FromBuffer"));

    let statics = data.type_of_kind(GenTypeKind::Statics).unwrap();
    assert!(statics.funcs.is_empty());
    assert!(data.imports.is_empty());

    Ok(())
}

#[test]
fn winmd_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("Windows.Foundation.winmd"),
        foundation()?.build_pe()?,
    )?;
    fs::write(
        dir.path().join("Windows.Storage.Streams.winmd"),
        streams()?.build()?,
    )?;
    fs::write(dir.path().join("readme.txt"), "unrelated")?;

    let config =
        GeneratorConfig::new("Windows.Storage.Streams.DataReader").with_container_path(dir.path());
    let data = generate(&config)?;
    assert_eq!(data.package, "datareader");

    let config = GeneratorConfig::new("Windows.Foundation.MemoryBuffer")
        .with_container_path(dir.path().join("Windows.Foundation.winmd"));
    let data = generate(&config)?;
    assert_eq!(data.types[0].name, "IMemoryBuffer");

    Ok(())
}

#[test]
fn guid_blob() -> Result<()> {
    let blob = [
        0x01, 0x00, 0x6f, 0x33, 0xac, 0xa6, 0xd3, 0xf3, 0x97, 0x42, 0x8d, 0x6c, 0xc8, 0x1e, 0xa6,
        0x62, 0x3f, 0x40, 0x00, 0x00,
    ];
    assert_eq!(guid_from_blob(&blob)?, "a6ac336f-f3d3-4297-8d6c-c81ea6623f40");
    Ok(())
}
