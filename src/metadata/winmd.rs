//! A loaded Windows Runtime metadata file.
//!
//! [`WinMd`] owns the container bytes (memory mapped or in memory) and keeps the parsed
//! metadata root, table header and heaps borrowing from them. It is the handle every
//! resolver function works on; dropping it releases the container.
//!
//! # Examples
//!
//! ```rust,no_run
//! use winmdgen::metadata::{tables::TypeDefRaw, winmd::{Container, WinMd}};
//!
//! let winmd = WinMd::open(&Container::from("Windows.Foundation.winmd"))?;
//! for type_def in &winmd.table::<TypeDefRaw>() {
//!     println!("{}", type_def?.full_name(&winmd)?);
//! }
//! # Ok::<(), winmdgen::Error>(())
//! ```

use log::debug;
use ouroboros::self_referencing;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        streams::{Blob, Guid, Strings, TablesHeader},
        tables::{MetadataTable, ModuleRaw, RowReadable, TableId, TypeDefRaw, TypeRefRaw},
        token::Token,
    },
    Error::{NotSupported, OutOfBounds},
    Result,
};

/// Where a metadata file comes from
#[derive(Clone, PartialEq, Eq)]
pub enum Container {
    /// A `.winmd` file, or a directory of them
    Path(PathBuf),
    /// An in-memory image, with a name used in diagnostics
    Bytes {
        /// Display name
        name: String,
        /// The file contents
        data: Vec<u8>,
    },
}

impl Container {
    /// Display name of the container
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Container::Path(path) => path.display().to_string(),
            Container::Bytes { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Container::Bytes { name, data } => f
                .debug_struct("Bytes")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
        }
    }
}

impl From<PathBuf> for Container {
    fn from(path: PathBuf) -> Self {
        Container::Path(path)
    }
}

impl From<&Path> for Container {
    fn from(path: &Path) -> Self {
        Container::Path(path.to_path_buf())
    }
}

impl From<&str> for Container {
    fn from(path: &str) -> Self {
        Container::Path(PathBuf::from(path))
    }
}

struct WinMdData<'a> {
    cor20header: Option<Cor20Header>,
    root: Root,
    tables: TablesHeader<'a>,
    strings: Strings<'a>,
    blobs: Option<Blob<'a>>,
    guids: Option<Guid<'a>>,
}

impl<'a> WinMdData<'a> {
    fn from_file(file: &'a File) -> Result<Self> {
        let data = file.data();

        let (cor20header, metadata) = match file.clr() {
            Some((clr_rva, clr_size)) => {
                let clr_offset = file.rva_to_offset(clr_rva)?;
                let cor20header = Cor20Header::read(file.data_slice(clr_offset, clr_size)?)?;

                let metadata_offset = file.rva_to_offset(cor20header.meta_data_rva as usize)?;
                let metadata =
                    file.data_slice(metadata_offset, cor20header.meta_data_size as usize)?;
                (Some(cor20header), metadata)
            }
            None if file.is_pe() => {
                return Err(malformed_error!("PE image without a CLR runtime header"))
            }
            None => (None, data),
        };

        let root = Root::read(metadata)?;

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;
        let mut guids = None;

        for stream in &root.stream_headers {
            let start = stream.offset as usize;
            let end = start
                .checked_add(stream.size as usize)
                .ok_or(OutOfBounds)?;
            if end > metadata.len() {
                return Err(OutOfBounds);
            }

            let stream_data = &metadata[start..end];
            match stream.name.as_str() {
                "#~" => tables = Some(TablesHeader::from(stream_data)?),
                "#-" => return Err(NotSupported),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                "#GUID" => guids = Some(Guid::from(stream_data)?),
                _ => {}
            }
        }

        let Some(tables) = tables else {
            return Err(malformed_error!("Metadata has no #~ stream"));
        };
        let Some(strings) = strings else {
            return Err(malformed_error!("Metadata has no #Strings stream"));
        };

        Ok(WinMdData {
            cor20header,
            root,
            tables,
            strings,
            blobs,
            guids,
        })
    }
}

#[self_referencing]
/// A parsed `.winmd` file.
///
/// Owns the backing [`File`] and borrows every heap and table view from it.
pub struct WinMd {
    name: String,
    file: Arc<File>,

    #[borrows(file)]
    #[not_covariant]
    data: WinMdData<'this>,
}

impl WinMd {
    /// Load a metadata file from a container.
    ///
    /// # Errors
    /// Returns an error if the container cannot be read, is neither a PE image nor a bare
    /// metadata root, or its metadata is malformed. A directory is not a loadable container.
    pub fn open(container: &Container) -> Result<Self> {
        match container {
            Container::Path(path) => Self::from_file(path),
            Container::Bytes { name, data } => Self::from_mem(name, data.clone()),
        }
    }

    /// Load a metadata file from disk. The file is memory mapped.
    ///
    /// # Errors
    /// See [`WinMd::open`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = Arc::new(File::from_file(path)?);
        Self::load(path.display().to_string(), file)
    }

    /// Load a metadata file from a buffer.
    ///
    /// # Errors
    /// See [`WinMd::open`].
    pub fn from_mem(name: &str, data: Vec<u8>) -> Result<Self> {
        let file = Arc::new(File::from_mem(data)?);
        Self::load(name.to_string(), file)
    }

    fn load(name: String, file: Arc<File>) -> Result<Self> {
        let winmd = WinMd::try_new(name, file, |file| WinMdData::from_file(file))?;

        if let Ok(module) = winmd.table::<ModuleRaw>().get(1) {
            debug!(
                "loaded {}: module {}, mvid {}",
                winmd.name(),
                module.name(&winmd).unwrap_or("<invalid>"),
                module
                    .mvid(&winmd)
                    .ok()
                    .flatten()
                    .map_or_else(|| "<none>".to_string(), |mvid| mvid.to_string())
            );
        }

        Ok(winmd)
    }

    /// Name of the container this file was loaded from
    #[must_use]
    pub fn name(&self) -> &str {
        self.borrow_name()
    }

    /// The underlying file
    #[must_use]
    pub fn file(&self) -> &Arc<File> {
        self.borrow_file()
    }

    /// The CLR runtime header, `None` for bare metadata roots
    #[must_use]
    pub fn cor20header(&self) -> Option<&Cor20Header> {
        self.with_data(|data| data.cor20header.as_ref())
    }

    /// The metadata root
    #[must_use]
    pub fn root(&self) -> &Root {
        self.with_data(|data| &data.root)
    }

    /// The `#~` stream
    #[must_use]
    pub fn tables(&self) -> &TablesHeader {
        self.with_data(|data| &data.tables)
    }

    /// The `#Strings` heap
    #[must_use]
    pub fn strings(&self) -> &Strings {
        self.with_data(|data| &data.strings)
    }

    /// The `#Blob` heap, if present
    #[must_use]
    pub fn blobs(&self) -> Option<&Blob> {
        self.with_data(|data| data.blobs.as_ref())
    }

    /// The `#GUID` heap, if present
    #[must_use]
    pub fn guids(&self) -> Option<&Guid> {
        self.with_data(|data| data.guids.as_ref())
    }

    /// Typed view of the table holding `T` rows; empty if the table is absent
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> MetadataTable<'_, T> {
        self.tables().table::<T>()
    }

    /// Get the string at `index` of the `#Strings` heap.
    ///
    /// # Errors
    /// Returns an error if the index is outside the heap or the string is not UTF-8.
    pub fn string(&self, index: u32) -> Result<&str> {
        self.with_data(|data| data.strings.get(index as usize))
    }

    /// Get the blob at `index` of the `#Blob` heap.
    ///
    /// # Errors
    /// Returns an error if there is no `#Blob` heap or the index is outside it.
    pub fn blob(&self, index: u32) -> Result<&[u8]> {
        self.with_data(|data| match &data.blobs {
            Some(blobs) => blobs.get(index as usize),
            None => Err(malformed_error!(
                "Blob {} referenced without a #Blob heap",
                index
            )),
        })
    }

    /// Resolve a `TypeDef` or `TypeRef` token to `(namespace, name)`.
    ///
    /// # Errors
    /// Returns an error for tokens of any other table (`TypeSpec` instantiations included)
    /// and for rows that do not decode.
    pub fn type_name(&self, token: Token) -> Result<(&str, &str)> {
        match token.table() {
            table if table == TableId::TypeDef.number() => {
                let type_def = self.table::<TypeDefRaw>().get(token.row())?;
                Ok((type_def.namespace(self)?, type_def.name(self)?))
            }
            table if table == TableId::TypeRef.number() => {
                let type_ref = self.table::<TypeRefRaw>().get(token.row())?;
                Ok((type_ref.namespace(self)?, type_ref.name(self)?))
            }
            _ => Err(malformed_error!(
                "Token {} does not name a TypeDef or TypeRef",
                token
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{builder::MetadataBuilder, tables::MethodDefRaw},
        test::{buffer_fixture, minimal_metadata},
    };
    use std::io::Write;

    #[test]
    fn bare_root() {
        let winmd = WinMd::from_mem("minimal.winmd", minimal_metadata()).unwrap();

        assert_eq!(winmd.name(), "minimal.winmd");
        assert!(winmd.cor20header().is_none());
        assert_eq!(winmd.root().version, "WindowsRuntime 1.4");
        assert!(winmd.tables().has_table(TableId::Module));
        assert_eq!(winmd.table::<ModuleRaw>().row_count(), 1);

        let module = winmd.table::<ModuleRaw>().get(1).unwrap();
        assert_eq!(module.name(&winmd).unwrap(), "Test");
        assert!(module.mvid(&winmd).unwrap().is_some());
    }

    #[test]
    fn pe_image() {
        let image = MetadataBuilder::new("Test").build_pe().unwrap();
        let winmd = WinMd::from_mem("pe.winmd", image).unwrap();

        let cor20 = winmd.cor20header().unwrap();
        assert_eq!(cor20.cb, 72);
        assert_eq!(winmd.root().version, "WindowsRuntime 1.4");

        let module = winmd.table::<ModuleRaw>().get(1).unwrap();
        assert_eq!(module.name(&winmd).unwrap(), "Test");
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&buffer_fixture()).unwrap();

        let winmd = WinMd::open(&Container::from(file.path())).unwrap();
        assert!(winmd.table::<TypeDefRaw>().row_count() > 0);
        assert_eq!(winmd.name(), file.path().display().to_string());
    }

    #[test]
    fn type_names() {
        let winmd = WinMd::from_mem("fixture", buffer_fixture()).unwrap();

        let names: Vec<String> = winmd
            .table::<TypeDefRaw>()
            .iter()
            .map(|type_def| type_def.unwrap().full_name(&winmd).unwrap())
            .collect();
        assert!(names.contains(&"Windows.Storage.Streams.Buffer".to_string()));
        assert!(names.contains(&"Windows.Storage.Streams.IBuffer".to_string()));

        let buffer = winmd
            .table::<TypeDefRaw>()
            .iter()
            .map(Result::unwrap)
            .find(|type_def| type_def.name(&winmd).unwrap() == "IBuffer")
            .unwrap();
        assert_eq!(
            winmd.type_name(buffer.token).unwrap(),
            ("Windows.Storage.Streams", "IBuffer")
        );

        assert!(winmd.type_name(Token::new(0x1B00_0001)).is_err());
        assert!(winmd.type_name(Token::new(0x0200_FFFF)).is_err());
    }

    #[test]
    fn method_runs() {
        let winmd = WinMd::from_mem("fixture", buffer_fixture()).unwrap();

        let interface = winmd
            .table::<TypeDefRaw>()
            .iter()
            .map(Result::unwrap)
            .find(|type_def| type_def.name(&winmd).unwrap() == "IBuffer")
            .unwrap();

        let methods: Vec<MethodDefRaw> = interface.methods(&winmd).unwrap();
        let names: Vec<&str> = methods
            .iter()
            .map(|method| method.name(&winmd).unwrap())
            .collect();
        assert_eq!(names, vec!["get_Capacity", "get_Length", "put_Length"]);

        let put_length = &methods[2];
        let params = put_length.params(&winmd).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name(&winmd).unwrap(), "value");
        assert!(params[0].is_in());

        let signature = put_length.signature(&winmd).unwrap();
        assert!(signature.has_this);
        assert_eq!(signature.params.len(), 1);
    }

    #[test]
    fn invalid_containers() {
        assert!(matches!(
            WinMd::from_mem("zeros", vec![0_u8; 100]),
            Err(NotSupported)
        ));
        assert!(WinMd::from_mem("empty", Vec::new()).is_err());
        assert!(WinMd::open(&Container::from("does/not/exist.winmd")).is_err());
    }

    #[test]
    fn container_names() {
        let bytes = Container::Bytes {
            name: "in-memory".to_string(),
            data: vec![1, 2, 3],
        };
        assert_eq!(bytes.name(), "in-memory");
        assert_eq!(format!("{bytes:?}"), "Bytes { name: \"in-memory\", len: 3 }");
        assert_eq!(Container::from("a/b.winmd").name(), "a/b.winmd");
    }
}
