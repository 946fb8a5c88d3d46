//! Search of a runtime class across metadata containers.

use std::{fs, path::Path};

use log::debug;

use crate::{
    generator::{assembler::assemble, config::GeneratorConfig, ir::GenData, locator::find_class},
    metadata::winmd::{Container, WinMd},
    Error, Result,
};

/// Try `attempt` on each candidate in order.
///
/// Returns the first `Some`, skipping candidates that yield `Ok(None)`. The first error
/// stops the search.
///
/// # Errors
/// Returns the first error raised by `attempt`.
pub fn first_match<I, T, F>(candidates: I, mut attempt: F) -> Result<Option<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<Option<T>>,
{
    for candidate in candidates {
        if let Some(found) = attempt(candidate)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

fn is_winmd(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("winmd"))
}

/// Replace every directory by the `*.winmd` files it contains, sorted by path.
///
/// # Errors
/// Returns an error if a directory cannot be read.
pub fn expand_containers(containers: &[Container]) -> Result<Vec<Container>> {
    let mut expanded = Vec::with_capacity(containers.len());

    for container in containers {
        match container {
            Container::Path(path) if path.is_dir() => {
                let mut files = Vec::new();
                for entry in fs::read_dir(path)? {
                    let file = entry?.path();
                    if is_winmd(&file) {
                        files.push(file);
                    }
                }

                files.sort();
                debug!("{} metadata files in {}", files.len(), path.display());
                expanded.extend(files.into_iter().map(Container::Path));
            }
            _ => expanded.push(container.clone()),
        }
    }

    Ok(expanded)
}

/// Generate the IR of `config.class`.
///
/// Containers are searched in order, each opened and released before the next one. A
/// container without the class is skipped; the first container defining it is used and no
/// other is opened.
///
/// # Errors
/// Returns [`Error::Config`] for an invalid configuration, [`Error::ClassNotFound`] if no
/// container defines the class, and any error raised while opening a container or building
/// the IR.
///
/// # Examples
///
/// ```rust,no_run
/// use winmdgen::{generate, GeneratorConfig};
///
/// let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer")
///     .with_container_path("C:/Windows/System32/WinMetadata");
///
/// let data = generate(&config)?;
/// for gen_type in &data.types {
///     println!("{} ({} functions)", gen_type.name, gen_type.funcs.len());
/// }
/// # Ok::<(), winmdgen::Error>(())
/// ```
pub fn generate(config: &GeneratorConfig) -> Result<GenData> {
    config.validate()?;

    let containers = expand_containers(&config.containers)?;
    debug!("Searching {} in {} containers", config.class, containers.len());

    let found = first_match(containers, |container| {
        let winmd = WinMd::open(&container)?;

        match find_class(&winmd, &config.class) {
            Ok(rid) => assemble(&winmd, rid, config).map(Some),
            Err(Error::ClassNotFound(_)) => {
                debug!("{} not in {}", config.class, container.name());
                Ok(None)
            }
            Err(error) => Err(error),
        }
    })?;

    found.ok_or_else(|| Error::ClassNotFound(config.class.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{buffer_fixture, minimal_metadata};
    use std::cell::Cell;

    const CLASS: &str = "Windows.Storage.Streams.Buffer";

    #[test]
    fn first_match_order() {
        let visited = Cell::new(0);
        let found = first_match([1, 2, 3, 4], |n| {
            visited.set(visited.get() + 1);
            Ok((n % 2 == 0).then_some(n * 10))
        })
        .unwrap();

        assert_eq!(found, Some(20));
        assert_eq!(visited.get(), 2);

        let none: Option<u32> = first_match([1, 3], |_| Ok(None)).unwrap();
        assert!(none.is_none());

        let error = first_match([1, 2], |n| {
            if n == 1 {
                Err(Error::Empty)
            } else {
                Ok(Some(n))
            }
        });
        assert!(matches!(error, Err(Error::Empty)));
    }

    #[test]
    fn second_container() {
        let config = GeneratorConfig::new(CLASS)
            .with_container_bytes("empty.winmd", minimal_metadata())
            .with_container_bytes("streams.winmd", buffer_fixture());

        let data = generate(&config).unwrap();
        assert_eq!(data.package, "buffer");
    }

    #[test]
    fn not_found_anywhere() {
        let config = GeneratorConfig::new("Windows.Foundation.Uri")
            .with_container_bytes("empty.winmd", minimal_metadata())
            .with_container_bytes("streams.winmd", buffer_fixture());

        assert!(matches!(
            generate(&config),
            Err(Error::ClassNotFound(name)) if name == "Windows.Foundation.Uri"
        ));
    }

    #[test]
    fn fatal_errors_stop_the_search() {
        let config = GeneratorConfig::new(CLASS)
            .with_container_bytes("broken.winmd", vec![0; 100])
            .with_container_bytes("streams.winmd", buffer_fixture());
        assert!(matches!(generate(&config), Err(Error::NotSupported)));

        // A missing primary interface is not retried in later containers
        let config = GeneratorConfig::new("Windows.Storage.Streams.OrphanBuffer")
            .with_container_bytes("streams.winmd", buffer_fixture())
            .with_container_bytes("again.winmd", buffer_fixture());
        assert!(matches!(
            generate(&config),
            Err(Error::ClassNotFound(name)) if name == "Windows.Storage.Streams.IOrphanBuffer"
        ));
    }

    #[test]
    fn invalid_config() {
        let config = GeneratorConfig::new(CLASS);
        assert!(matches!(generate(&config), Err(Error::Config(_))));
    }

    #[test]
    fn directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.winmd"), buffer_fixture()).unwrap();
        fs::write(dir.path().join("a.WinMD"), minimal_metadata()).unwrap();
        fs::write(dir.path().join("notes.txt"), b"not metadata").unwrap();
        fs::create_dir(dir.path().join("nested.winmd")).unwrap();

        let expanded = expand_containers(&[
            Container::Bytes {
                name: "first".to_string(),
                data: Vec::new(),
            },
            Container::Path(dir.path().to_path_buf()),
        ])
        .unwrap();

        assert_eq!(
            expanded,
            vec![
                Container::Bytes {
                    name: "first".to_string(),
                    data: Vec::new(),
                },
                Container::Path(dir.path().join("a.WinMD")),
                Container::Path(dir.path().join("b.winmd")),
            ]
        );

        let config = GeneratorConfig::new(CLASS).with_container_path(dir.path());
        assert_eq!(generate(&config).unwrap().package, "buffer");
    }
}
