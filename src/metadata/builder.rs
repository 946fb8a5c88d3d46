//! Writer for minimal, well-formed Windows Runtime metadata.
//!
//! [`MetadataBuilder`] declares types, methods, parameters and attributes and serializes them
//! into the same layout the readers consume: a `BSJB` metadata root with `#~`, `#Strings`,
//! `#Blob` and `#GUID` streams, optionally wrapped in a single-section PE32 image with a CLR
//! runtime header. Only the tables the resolver reads are written.
//!
//! # Examples
//!
//! ```rust
//! use winmdgen::metadata::{
//!     builder::MetadataBuilder,
//!     signatures::{SignatureMethod, SignatureParameter, TypeSignature},
//!     winmd::WinMd,
//! };
//!
//! let mut builder = MetadataBuilder::new("Sample.winmd");
//! let interface = builder.add_interface("Sample", "IGreeter");
//! builder.add_method(
//!     interface,
//!     "Greet",
//!     SignatureMethod {
//!         has_this: true,
//!         param_count: 1,
//!         return_type: SignatureParameter::new(TypeSignature::String),
//!         params: vec![SignatureParameter::new(TypeSignature::String)],
//!         ..Default::default()
//!     },
//!     &[("name", 0x1)],
//! )?;
//!
//! let winmd = WinMd::from_mem("sample", builder.build()?)?;
//! assert_eq!(winmd.tables().table_row_count(winmdgen::metadata::tables::TableId::MethodDef), 1);
//! # Ok::<(), winmdgen::Error>(())
//! ```

use std::collections::HashMap;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        root::CIL_HEADER_MAGIC,
        signatures::{
            encode_method_signature, write_compressed_uint, SignatureMethod, SignatureParameter,
            TypeSignature,
        },
        tables::{CodedIndex, CodedIndexType, TableId, TableInfo, TableInfoRef, TypeAttributes},
        token::Token,
    },
    Result,
};

const METADATA_VERSION: &str = "WindowsRuntime 1.4";
const INTERFACE_METHOD_FLAGS: u16 = 0x05C6;
const GUID_ATTRIBUTE_NAMESPACE: &str = "Windows.Foundation.Metadata";
const GUID_ATTRIBUTE_NAME: &str = "GuidAttribute";

const PE_POINTER: usize = 0x80;
const FILE_ALIGNMENT: usize = 0x200;
const SECTION_ALIGNMENT: usize = 0x2000;
const SECTION_RVA: usize = 0x2000;
const CLR_HEADER_SIZE: usize = 72;

struct MethodEntry {
    name: String,
    signature: SignatureMethod,
    params: Vec<(String, u16)>,
}

struct TypeEntry {
    flags: u32,
    namespace: String,
    name: String,
    extends: Option<Token>,
    methods: Vec<MethodEntry>,
}

struct MemberRefEntry {
    class: Token,
    name: String,
    signature: Vec<u8>,
}

struct AttributeEntry {
    parent: Token,
    constructor: Token,
    value: Vec<u8>,
}

#[derive(Default)]
struct StringHeap {
    data: Vec<u8>,
    index: HashMap<String, u32>,
}

impl StringHeap {
    fn new() -> Self {
        StringHeap {
            data: vec![0],
            index: HashMap::new(),
        }
    }

    fn add(&mut self, value: &str) -> Result<u32> {
        if value.is_empty() {
            return Ok(0);
        }

        if let Some(index) = self.index.get(value) {
            return Ok(*index);
        }

        let index = heap_offset(self.data.len())?;
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
        self.index.insert(value.to_string(), index);

        Ok(index)
    }
}

struct BlobHeap {
    data: Vec<u8>,
}

impl BlobHeap {
    fn new() -> Self {
        BlobHeap { data: vec![0] }
    }

    fn add(&mut self, value: &[u8]) -> Result<u32> {
        if value.is_empty() {
            return Ok(0);
        }

        let index = heap_offset(self.data.len())?;
        write_compressed_uint(heap_offset(value.len())?, &mut self.data)?;
        self.data.extend_from_slice(value);

        Ok(index)
    }
}

fn heap_offset(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| malformed_error!("Heap exceeds 4GB - {}", len))
}

fn push_index(buffer: &mut Vec<u8>, value: u32, is_large: bool) -> Result<()> {
    if is_large {
        buffer.extend_from_slice(&value.to_le_bytes());
    } else {
        let value = u16::try_from(value)
            .map_err(|_| malformed_error!("Index {} does not fit a small column", value))?;
        buffer.extend_from_slice(&value.to_le_bytes());
    }

    Ok(())
}

fn push_coded_index(
    buffer: &mut Vec<u8>,
    sizes: &TableInfoRef,
    ci_type: CodedIndexType,
    token: Token,
) -> Result<()> {
    let value = if token.is_null() {
        0
    } else {
        let Some(table) = TableId::iter().find(|table| table.number() == token.table()) else {
            return Err(malformed_error!("Unknown table in token {}", token));
        };

        CodedIndex::encode(ci_type, table, token.row()).ok_or_else(|| {
            malformed_error!("Token {} cannot be encoded as {:?}", token, ci_type)
        })?
    };

    push_index(buffer, value, sizes.coded_index_bytes(ci_type) == 4)
}

fn pad4(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

fn align(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

fn table_rows(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| malformed_error!("Too many rows - {}", count))
}

/// Declarative writer for Windows Runtime metadata.
pub struct MetadataBuilder {
    module_name: String,
    mvid: uguid::Guid,
    types: Vec<TypeEntry>,
    type_refs: Vec<(String, String)>,
    member_refs: Vec<MemberRefEntry>,
    attributes: Vec<AttributeEntry>,
    guid_constructor: Option<Token>,
}

impl MetadataBuilder {
    /// Start an empty module named `module_name`
    #[must_use]
    pub fn new(module_name: &str) -> Self {
        MetadataBuilder {
            module_name: module_name.to_string(),
            mvid: uguid::Guid::from_bytes([
                0x6f, 0x33, 0xac, 0xa6, 0xd3, 0xf3, 0x97, 0x42, 0x8d, 0x6c, 0xc8, 0x1e, 0xa6,
                0x62, 0x3f, 0x40,
            ]),
            types: Vec::new(),
            type_refs: Vec::new(),
            member_refs: Vec::new(),
            attributes: Vec::new(),
            guid_constructor: None,
        }
    }

    /// Set the module version id
    pub fn set_mvid(&mut self, mvid: uguid::Guid) {
        self.mvid = mvid;
    }

    /// Declare a type and return its `TypeDef` token.
    pub fn add_type(
        &mut self,
        namespace: &str,
        name: &str,
        flags: u32,
        extends: Option<Token>,
    ) -> Token {
        self.types.push(TypeEntry {
            flags,
            namespace: namespace.to_string(),
            name: name.to_string(),
            extends,
            methods: Vec::new(),
        });

        Token::from_parts(TableId::TypeDef.number(), self.types.len() as u32)
    }

    /// Declare a Windows Runtime interface
    pub fn add_interface(&mut self, namespace: &str, name: &str) -> Token {
        self.add_type(
            namespace,
            name,
            TypeAttributes::PUBLIC
                | TypeAttributes::INTERFACE
                | TypeAttributes::ABSTRACT
                | TypeAttributes::WINDOWS_RUNTIME,
            None,
        )
    }

    /// Declare a sealed Windows Runtime class deriving from `System.Object`
    pub fn add_runtime_class(&mut self, namespace: &str, name: &str) -> Token {
        let object = self.type_ref("System", "Object");
        self.add_type(
            namespace,
            name,
            TypeAttributes::PUBLIC | TypeAttributes::SEALED | TypeAttributes::WINDOWS_RUNTIME,
            Some(object),
        )
    }

    /// Reference a type defined in another file, returning its `TypeRef` token.
    ///
    /// Repeated references to the same name share one row.
    pub fn type_ref(&mut self, namespace: &str, name: &str) -> Token {
        let existing = self
            .type_refs
            .iter()
            .position(|(ns, n)| ns == namespace && n == name);

        let position = match existing {
            Some(position) => position,
            None => {
                self.type_refs
                    .push((namespace.to_string(), name.to_string()));
                self.type_refs.len() - 1
            }
        };

        Token::from_parts(TableId::TypeRef.number(), position as u32 + 1)
    }

    /// Append a method to the type `owner`.
    ///
    /// `params` lists the `Param` rows as `(name, flags)`; their sequence numbers are
    /// assigned in order starting at 1.
    ///
    /// # Errors
    /// Returns an error if `owner` is not a type declared on this builder.
    pub fn add_method(
        &mut self,
        owner: Token,
        name: &str,
        signature: SignatureMethod,
        params: &[(&str, u32)],
    ) -> Result<()> {
        let entry = self.type_entry(owner)?;

        let mut param_rows = Vec::with_capacity(params.len());
        for (param_name, flags) in params {
            let flags = u16::try_from(*flags)
                .map_err(|_| malformed_error!("Invalid param flags - {}", flags))?;
            param_rows.push(((*param_name).to_string(), flags));
        }

        entry.methods.push(MethodEntry {
            name: name.to_string(),
            signature,
            params: param_rows,
        });

        Ok(())
    }

    /// Reference a member of `class`, returning its `MemberRef` token.
    ///
    /// # Errors
    /// Returns an error if the signature cannot be encoded.
    pub fn member_ref(
        &mut self,
        class: Token,
        name: &str,
        signature: &SignatureMethod,
    ) -> Result<Token> {
        self.member_refs.push(MemberRefEntry {
            class,
            name: name.to_string(),
            signature: encode_method_signature(signature)?,
        });

        Ok(Token::from_parts(
            TableId::MemberRef.number(),
            self.member_refs.len() as u32,
        ))
    }

    /// Attach a custom attribute with a raw value blob.
    ///
    /// Attributes are written grouped by parent, in declaration order within each parent.
    pub fn add_custom_attribute(&mut self, parent: Token, constructor: Token, value: Vec<u8>) {
        self.attributes.push(AttributeEntry {
            parent,
            constructor,
            value,
        });
    }

    /// Attach a `GuidAttribute` carrying `guid` to `parent`.
    ///
    /// # Errors
    /// Returns an error if the attribute constructor cannot be declared.
    pub fn add_guid(&mut self, parent: Token, guid: uguid::Guid) -> Result<()> {
        let mut value = vec![0x01, 0x00];
        value.extend_from_slice(&guid.to_bytes());
        value.extend_from_slice(&[0x00, 0x00]);

        let constructor = self.guid_constructor()?;
        self.add_custom_attribute(parent, constructor, value);

        Ok(())
    }

    /// The `GuidAttribute(u32, u16, u16, u8 x 8)` constructor, declared on first use.
    ///
    /// # Errors
    /// Returns an error if the constructor signature cannot be encoded.
    pub fn guid_constructor(&mut self) -> Result<Token> {
        if let Some(constructor) = self.guid_constructor {
            return Ok(constructor);
        }

        let attribute = self.type_ref(GUID_ATTRIBUTE_NAMESPACE, GUID_ATTRIBUTE_NAME);

        let mut params = vec![
            SignatureParameter::new(TypeSignature::U4),
            SignatureParameter::new(TypeSignature::U2),
            SignatureParameter::new(TypeSignature::U2),
        ];
        params.extend((0..8).map(|_| SignatureParameter::new(TypeSignature::U1)));

        let signature = SignatureMethod {
            has_this: true,
            param_count: 11,
            return_type: SignatureParameter::new(TypeSignature::Void),
            params,
            ..Default::default()
        };

        let constructor = self.member_ref(attribute, ".ctor", &signature)?;
        self.guid_constructor = Some(constructor);

        Ok(constructor)
    }

    fn type_entry(&mut self, token: Token) -> Result<&mut TypeEntry> {
        if token.table() != TableId::TypeDef.number() || token.row() == 0 {
            return Err(malformed_error!("{} is not a TypeDef token", token));
        }

        self.types
            .get_mut(token.row() as usize - 1)
            .ok_or_else(|| malformed_error!("TypeDef {} was not declared", token))
    }

    /// Serialize a bare metadata root.
    ///
    /// # Errors
    /// Returns an error if a signature or token cannot be encoded, or a heap outgrows its
    /// index width.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut strings = StringHeap::new();
        let mut blobs = BlobHeap::new();
        let mut guids: Vec<u8> = Vec::new();

        guids.extend_from_slice(&self.mvid.to_bytes());
        let module = (strings.add(&self.module_name)?, 1_u32);

        let mut type_refs = Vec::with_capacity(self.type_refs.len());
        for (namespace, name) in &self.type_refs {
            type_refs.push((strings.add(name)?, strings.add(namespace)?));
        }

        let mut type_defs = Vec::with_capacity(self.types.len());
        let mut methods = Vec::new();
        let mut params = Vec::new();
        for entry in &self.types {
            type_defs.push((
                entry.flags,
                strings.add(&entry.name)?,
                strings.add(&entry.namespace)?,
                entry.extends.unwrap_or(Token::new(0)),
                table_rows(methods.len() + 1)?,
            ));

            for method in &entry.methods {
                methods.push((
                    strings.add(&method.name)?,
                    blobs.add(&encode_method_signature(&method.signature)?)?,
                    table_rows(params.len() + 1)?,
                ));

                for (sequence, (name, flags)) in method.params.iter().enumerate() {
                    let sequence = u16::try_from(sequence + 1)
                        .map_err(|_| malformed_error!("Too many params - {}", sequence))?;
                    params.push((*flags, sequence, strings.add(name)?));
                }
            }
        }

        let mut member_refs = Vec::with_capacity(self.member_refs.len());
        for entry in &self.member_refs {
            member_refs.push((
                entry.class,
                strings.add(&entry.name)?,
                blobs.add(&entry.signature)?,
            ));
        }

        let mut attributes: Vec<&AttributeEntry> = self.attributes.iter().collect();
        attributes.sort_by_key(|attribute| attribute.parent.value());
        let mut custom_attributes = Vec::with_capacity(attributes.len());
        for entry in attributes {
            custom_attributes.push((entry.parent, entry.constructor, blobs.add(&entry.value)?));
        }

        pad4(&mut strings.data);
        pad4(&mut blobs.data);

        let row_counts = [
            (TableId::Module, 1),
            (TableId::TypeRef, table_rows(type_refs.len())?),
            (TableId::TypeDef, table_rows(type_defs.len())?),
            (TableId::MethodDef, table_rows(methods.len())?),
            (TableId::Param, table_rows(params.len())?),
            (TableId::MemberRef, table_rows(member_refs.len())?),
            (TableId::CustomAttribute, table_rows(custom_attributes.len())?),
        ];

        let mut heap_flags = 0_u8;
        if strings.data.len() > 0xFFFF {
            heap_flags |= 0x01;
        }
        if guids.len() / 16 > 0xFFFF {
            heap_flags |= 0x02;
        }
        if blobs.data.len() > 0xFFFF {
            heap_flags |= 0x04;
        }

        let mut valid = 0_u64;
        for (table, rows) in row_counts {
            if rows > 0 {
                valid |= 1 << table.number();
            }
        }

        let mut tables = vec![0, 0, 0, 0, 2, 0, heap_flags, 1];
        tables.extend_from_slice(&valid.to_le_bytes());
        tables.extend_from_slice(&(1_u64 << TableId::CustomAttribute.number()).to_le_bytes());
        for (_, rows) in row_counts {
            if rows > 0 {
                tables.extend_from_slice(&rows.to_le_bytes());
            }
        }

        let sizes: TableInfoRef = std::sync::Arc::new(TableInfo::new(&tables, valid)?);
        let large_str = sizes.is_large_str();
        let large_blob = sizes.is_large_blob();

        // Module
        tables.extend_from_slice(&0_u16.to_le_bytes());
        push_index(&mut tables, module.0, large_str)?;
        push_index(&mut tables, module.1, sizes.is_large_guid())?;
        push_index(&mut tables, 0, sizes.is_large_guid())?;
        push_index(&mut tables, 0, sizes.is_large_guid())?;

        for (name, namespace) in &type_refs {
            push_coded_index(
                &mut tables,
                &sizes,
                CodedIndexType::ResolutionScope,
                Token::new(1),
            )?;
            push_index(&mut tables, *name, large_str)?;
            push_index(&mut tables, *namespace, large_str)?;
        }

        for (flags, name, namespace, extends, method_list) in &type_defs {
            tables.extend_from_slice(&flags.to_le_bytes());
            push_index(&mut tables, *name, large_str)?;
            push_index(&mut tables, *namespace, large_str)?;
            push_coded_index(&mut tables, &sizes, CodedIndexType::TypeDefOrRef, *extends)?;
            push_index(&mut tables, 1, sizes.is_large(TableId::Field))?;
            push_index(&mut tables, *method_list, sizes.is_large(TableId::MethodDef))?;
        }

        for (name, signature, param_list) in &methods {
            tables.extend_from_slice(&0_u32.to_le_bytes());
            tables.extend_from_slice(&0_u16.to_le_bytes());
            tables.extend_from_slice(&INTERFACE_METHOD_FLAGS.to_le_bytes());
            push_index(&mut tables, *name, large_str)?;
            push_index(&mut tables, *signature, large_blob)?;
            push_index(&mut tables, *param_list, sizes.is_large(TableId::Param))?;
        }

        for (flags, sequence, name) in &params {
            tables.extend_from_slice(&flags.to_le_bytes());
            tables.extend_from_slice(&sequence.to_le_bytes());
            push_index(&mut tables, *name, large_str)?;
        }

        for (class, name, signature) in &member_refs {
            push_coded_index(&mut tables, &sizes, CodedIndexType::MemberRefParent, *class)?;
            push_index(&mut tables, *name, large_str)?;
            push_index(&mut tables, *signature, large_blob)?;
        }

        for (parent, constructor, value) in &custom_attributes {
            push_coded_index(
                &mut tables,
                &sizes,
                CodedIndexType::HasCustomAttribute,
                *parent,
            )?;
            push_coded_index(
                &mut tables,
                &sizes,
                CodedIndexType::CustomAttributeType,
                *constructor,
            )?;
            push_index(&mut tables, *value, large_blob)?;
        }

        pad4(&mut tables);

        Self::write_root(&[
            ("#~", &tables),
            ("#Strings", &strings.data),
            ("#Blob", &blobs.data),
            ("#GUID", &guids),
        ])
    }

    fn write_root(streams: &[(&str, &Vec<u8>)]) -> Result<Vec<u8>> {
        let mut version = METADATA_VERSION.as_bytes().to_vec();
        version.push(0);
        pad4(&mut version);

        let header_size = 16
            + version.len()
            + 4
            + streams
                .iter()
                .map(|(name, _)| 8 + align(name.len() + 1, 4))
                .sum::<usize>();

        let mut root = Vec::new();
        root.extend_from_slice(&CIL_HEADER_MAGIC.to_le_bytes());
        root.extend_from_slice(&1_u16.to_le_bytes());
        root.extend_from_slice(&1_u16.to_le_bytes());
        root.extend_from_slice(&0_u32.to_le_bytes());
        root.extend_from_slice(&heap_offset(version.len())?.to_le_bytes());
        root.extend_from_slice(&version);
        root.extend_from_slice(&0_u16.to_le_bytes());
        root.extend_from_slice(
            &u16::try_from(streams.len())
                .map_err(|_| malformed_error!("Too many streams"))?
                .to_le_bytes(),
        );

        let mut offset = header_size;
        for (name, data) in streams {
            root.extend_from_slice(&heap_offset(offset)?.to_le_bytes());
            root.extend_from_slice(&heap_offset(data.len())?.to_le_bytes());
            root.extend_from_slice(name.as_bytes());
            root.push(0);
            pad4(&mut root);
            offset += data.len();
        }

        for (_, data) in streams {
            root.extend_from_slice(data);
        }

        Ok(root)
    }

    /// Serialize the metadata wrapped in a minimal PE32 image.
    ///
    /// The image has a single `.text` section holding the CLR runtime header followed by
    /// the metadata root.
    ///
    /// # Errors
    /// See [`MetadataBuilder::build`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn build_pe(&self) -> Result<Vec<u8>> {
        let metadata = self.build()?;

        let section_size = CLR_HEADER_SIZE + metadata.len();
        let raw_size = align(section_size, FILE_ALIGNMENT);
        let image_size = SECTION_RVA + align(section_size, SECTION_ALIGNMENT);
        let metadata_rva = SECTION_RVA + CLR_HEADER_SIZE;

        let to_u32 = |value: usize| heap_offset(value);

        let mut image = vec![0_u8; FILE_ALIGNMENT];
        image[0..2].copy_from_slice(b"MZ");
        image[0x3C..0x40].copy_from_slice(&(PE_POINTER as u32).to_le_bytes());

        let mut headers = Vec::new();
        headers.extend_from_slice(b"PE\0\0");

        // COFF header
        headers.extend_from_slice(&0x014C_u16.to_le_bytes());
        headers.extend_from_slice(&1_u16.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&224_u16.to_le_bytes());
        headers.extend_from_slice(&0x2102_u16.to_le_bytes());

        // Optional header, standard fields
        headers.extend_from_slice(&0x010B_u16.to_le_bytes());
        headers.extend_from_slice(&[8, 0]);
        headers.extend_from_slice(&to_u32(raw_size)?.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&to_u32(SECTION_RVA)?.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());

        // Optional header, Windows fields
        headers.extend_from_slice(&0x1000_0000_u32.to_le_bytes());
        headers.extend_from_slice(&to_u32(SECTION_ALIGNMENT)?.to_le_bytes());
        headers.extend_from_slice(&to_u32(FILE_ALIGNMENT)?.to_le_bytes());
        for version in [4_u16, 0, 0, 0, 4, 0] {
            headers.extend_from_slice(&version.to_le_bytes());
        }
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&to_u32(image_size)?.to_le_bytes());
        headers.extend_from_slice(&to_u32(FILE_ALIGNMENT)?.to_le_bytes());
        headers.extend_from_slice(&0_u32.to_le_bytes());
        headers.extend_from_slice(&3_u16.to_le_bytes());
        headers.extend_from_slice(&0x8540_u16.to_le_bytes());
        for reserve in [0x0010_0000_u32, 0x1000, 0x0010_0000, 0x1000, 0, 16] {
            headers.extend_from_slice(&reserve.to_le_bytes());
        }

        // Data directories, only the CLR runtime header (14) is set
        for index in 0..16 {
            if index == 14 {
                headers.extend_from_slice(&to_u32(SECTION_RVA)?.to_le_bytes());
                headers.extend_from_slice(&to_u32(CLR_HEADER_SIZE)?.to_le_bytes());
            } else {
                headers.extend_from_slice(&[0; 8]);
            }
        }

        // Section header
        headers.extend_from_slice(b".text\0\0\0");
        headers.extend_from_slice(&to_u32(section_size)?.to_le_bytes());
        headers.extend_from_slice(&to_u32(SECTION_RVA)?.to_le_bytes());
        headers.extend_from_slice(&to_u32(raw_size)?.to_le_bytes());
        headers.extend_from_slice(&to_u32(FILE_ALIGNMENT)?.to_le_bytes());
        headers.extend_from_slice(&[0; 12]);
        headers.extend_from_slice(&0x6000_0020_u32.to_le_bytes());

        image[PE_POINTER..PE_POINTER + headers.len()].copy_from_slice(&headers);

        // CLR runtime header, zero padded to its fixed size
        let mut clr = Vec::with_capacity(CLR_HEADER_SIZE);
        clr.extend_from_slice(&(CLR_HEADER_SIZE as u32).to_le_bytes());
        clr.extend_from_slice(&2_u16.to_le_bytes());
        clr.extend_from_slice(&5_u16.to_le_bytes());
        clr.extend_from_slice(&to_u32(metadata_rva)?.to_le_bytes());
        clr.extend_from_slice(&to_u32(metadata.len())?.to_le_bytes());
        clr.extend_from_slice(&1_u32.to_le_bytes());
        clr.resize(CLR_HEADER_SIZE, 0);
        image.extend_from_slice(&clr);

        image.extend_from_slice(&metadata);
        image.resize(FILE_ALIGNMENT + raw_size, 0);

        Ok(image)
    }
}
