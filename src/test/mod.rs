//! Metadata fixtures shared by the unit tests.

use crate::metadata::{
    builder::MetadataBuilder,
    signatures::{SignatureMethod, SignatureParameter, TypeSignature},
    tables::{ParamAttributes, TypeAttributes},
};

pub const BUFFER_NAMESPACE: &str = "Windows.Storage.Streams";
pub const IBUFFER_GUID: &str = "905a0fe0-bc53-11df-8c49-001e4fc686da";
pub const IBUFFER_FACTORY_GUID: &str = "71af914d-c10f-484b-bc50-14bc623b3a27";
pub const IBUFFER_STATICS_GUID: &str = "e901e65b-d716-475a-a90a-af7229b1e741";

/// An instance method signature
pub fn signature(params: Vec<TypeSignature>, return_type: TypeSignature) -> SignatureMethod {
    SignatureMethod {
        has_this: true,
        param_count: params.len() as u32,
        return_type: SignatureParameter::new(return_type),
        params: params.into_iter().map(SignatureParameter::new).collect(),
        ..Default::default()
    }
}

pub fn guid(value: &str) -> uguid::Guid {
    uguid::Guid::try_parse(value).unwrap()
}

/// A module without any types
pub fn minimal_metadata() -> Vec<u8> {
    MetadataBuilder::new("Test").build().unwrap()
}

/// `Windows.Storage.Streams.Buffer` with its primary, factory and statics interfaces.
///
/// Also declares `PlainBuffer`, which has an `IPlainBuffer` interface but lacks the
/// Windows Runtime flag, and `OrphanBuffer`, a runtime class without a primary interface.
pub fn buffer_builder() -> MetadataBuilder {
    let mut builder = MetadataBuilder::new("Windows.Storage.Streams.winmd");
    let input = ParamAttributes::IN;

    let buffer = builder.add_runtime_class(BUFFER_NAMESPACE, "Buffer");

    let ibuffer = builder.add_interface(BUFFER_NAMESPACE, "IBuffer");
    builder
        .add_method(ibuffer, "get_Capacity", signature(vec![], TypeSignature::U4), &[])
        .unwrap();
    builder
        .add_method(ibuffer, "get_Length", signature(vec![], TypeSignature::U4), &[])
        .unwrap();
    builder
        .add_method(
            ibuffer,
            "put_Length",
            signature(vec![TypeSignature::U4], TypeSignature::Void),
            &[("value", input)],
        )
        .unwrap();
    builder.add_guid(ibuffer, guid(IBUFFER_GUID)).unwrap();

    let factory = builder.add_interface(BUFFER_NAMESPACE, "IBufferFactory");
    builder
        .add_method(
            factory,
            "Create",
            signature(vec![TypeSignature::U4], TypeSignature::Class(buffer)),
            &[("capacity", input)],
        )
        .unwrap();
    builder.add_guid(factory, guid(IBUFFER_FACTORY_GUID)).unwrap();

    let memory_buffer = builder.type_ref("Windows.Foundation", "IMemoryBuffer");
    let statics = builder.add_interface(BUFFER_NAMESPACE, "IBufferStatics");
    builder
        .add_method(
            statics,
            "CreateCopyFromMemoryBuffer",
            signature(
                vec![TypeSignature::Class(memory_buffer)],
                TypeSignature::Class(ibuffer),
            ),
            &[("input", input)],
        )
        .unwrap();
    builder
        .add_method(
            statics,
            "CreateMemoryBufferOverIBuffer",
            signature(
                vec![TypeSignature::Class(ibuffer)],
                TypeSignature::Class(memory_buffer),
            ),
            &[("input", input)],
        )
        .unwrap();
    builder.add_guid(statics, guid(IBUFFER_STATICS_GUID)).unwrap();

    builder.add_type(
        BUFFER_NAMESPACE,
        "PlainBuffer",
        TypeAttributes::PUBLIC | TypeAttributes::SEALED,
        None,
    );
    let plain = builder.add_interface(BUFFER_NAMESPACE, "IPlainBuffer");
    builder
        .add_method(plain, "Close", signature(vec![], TypeSignature::Void), &[])
        .unwrap();

    builder.add_runtime_class(BUFFER_NAMESPACE, "OrphanBuffer");

    builder
}

/// The metadata root of [`buffer_builder`]
pub fn buffer_fixture() -> Vec<u8> {
    buffer_builder().build().unwrap()
}
