//! Naming conventions linking a runtime class to its interfaces.
//!
//! Metadata does not record which interfaces hold the instance, activation and static members
//! of a runtime class. Windows Runtime metadata follows a naming convention instead:
//!
//! | Role | Name for class `Buffer` |
//! |------|-------------------------|
//! | primary interface | `IBuffer` |
//! | activation factory | `IBufferFactory` |
//! | static members | `IBufferStatics` |
//!
//! Every derivation lives here so the resolver never builds these names inline.

/// `I<Class>`
#[must_use]
pub fn primary_interface_name(class_name: &str) -> String {
    format!("I{class_name}")
}

/// `<Primary>Factory`, e.g. `IBufferFactory`
#[must_use]
pub fn factory_interface_name(primary_interface: &str) -> String {
    format!("{primary_interface}Factory")
}

/// `<Primary>Statics`, e.g. `IBufferStatics`
#[must_use]
pub fn statics_interface_name(primary_interface: &str) -> String {
    format!("{primary_interface}Statics")
}

/// Name of the synthesized activation function, `Activate<Class>`
#[must_use]
pub fn constructor_name(class_name: &str) -> String {
    format!("Activate{class_name}")
}

/// The package generated for a class or interface name: the name in lowercase
#[must_use]
pub fn package_name(name: &str) -> String {
    name.to_lowercase()
}

/// `Namespace.Name`
#[must_use]
pub fn qualified_name(namespace: &str, name: &str) -> String {
    format!("{namespace}.{name}")
}

/// The interface a class-typed element is projected to.
///
/// Only interfaces are generated, so a reference to a runtime class `Buffer` is projected
/// to its primary interface `IBuffer`. Names already starting with `I` are kept as they are,
/// which misreads classes whose own name starts with `I` (`InkStroke`).
#[must_use]
pub fn interface_name_for_reference(name: &str) -> String {
    if name.starts_with('I') {
        name.to_string()
    } else {
        primary_interface_name(name)
    }
}

/// The package key of an interface: its name without the leading `I`, in lowercase.
#[must_use]
pub fn interface_package(interface_name: &str) -> String {
    package_name(interface_name.strip_prefix('I').unwrap_or(interface_name))
}
