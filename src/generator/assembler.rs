//! Assembly of the IR of one runtime class.

use log::{debug, info, warn};

use crate::{
    generator::{
        config::GeneratorConfig,
        guid::{type_guid, GuidLookup},
        ir::{
            Diagnostic, GenData, GenFunc, GenParam, GenType, GenTypeKind, ParamName, Projection,
            TypeIdentity,
        },
        locator::{find_class, find_type},
        method::{project_method, InterfaceContext},
        naming,
        projection::TypeProjector,
    },
    metadata::{tables::TypeDefRaw, winmd::WinMd},
    Error, Result,
};

fn identity(winmd: &WinMd, type_def: &TypeDefRaw) -> Result<TypeIdentity> {
    Ok(TypeIdentity {
        namespace: type_def.namespace(winmd)?.to_string(),
        name: type_def.name(winmd)?.to_string(),
        token: type_def.token,
    })
}

struct Assembler<'a> {
    config: &'a GeneratorConfig,
    projector: TypeProjector<'a>,
    runtime_class: TypeIdentity,
    diagnostics: Vec<Diagnostic>,
}

impl Assembler<'_> {
    fn constructor(&self, interface: &TypeIdentity, guid: Option<&str>) -> GenFunc {
        let class_name = &self.runtime_class.name;

        GenFunc {
            name: naming::constructor_name(class_name),
            is_constructor: true,
            in_params: Vec::new(),
            return_param: Some(GenParam {
                name: ParamName::Resolved(String::new()),
                type_name: Projection::Resolved(format!("*{class_name}")),
                default_value: Some(Projection::Resolved("nil".to_string())),
            }),
            parent_type: interface.clone(),
            parent_guid: guid.map(str::to_string),
            runtime_class: self.runtime_class.clone(),
            declaring_type: None,
        }
    }

    fn interface(&mut self, type_def: &TypeDefRaw, kind: GenTypeKind) -> Result<GenType> {
        let winmd = self.projector.winmd();
        let interface = identity(winmd, type_def)?;

        let guid = match type_guid(winmd, &interface.namespace, &interface.name) {
            GuidLookup::Found(guid) => Some(guid),
            GuidLookup::NotFound => {
                let diagnostic = Diagnostic::GuidNotFound {
                    type_name: interface.full_name(),
                };
                warn!("{}", diagnostic);
                self.diagnostics.push(diagnostic);
                None
            }
        };

        let mut funcs = Vec::new();
        if kind == GenTypeKind::Factory {
            let constructor = self.constructor(&interface, guid.as_deref());
            if self.config.keeps_method(&constructor.name) {
                funcs.push(constructor);
            }
        }

        let context = InterfaceContext {
            interface: &interface,
            guid: guid.as_deref(),
            runtime_class: &self.runtime_class,
        };

        for method in type_def.methods(winmd)? {
            let name = method.name(winmd)?;
            if !self.config.keeps_method(name) {
                debug!("Skipping {}.{} by filter", interface.name, name);
                continue;
            }

            funcs.push(project_method(
                &mut self.projector,
                &context,
                &method,
                &mut self.diagnostics,
            )?);
        }

        Ok(GenType {
            name: interface.name.clone(),
            kind,
            guid,
            funcs,
        })
    }
}

/// Build the IR of the runtime class at `TypeDef` row `rid`.
///
/// The primary interface `I<Class>` is required. The factory `I<Class>Factory` and the
/// statics `I<Class>Statics` are projected when present, unless disabled in `config`; the
/// factory is preceded by the synthesized `Activate<Class>` constructor.
///
/// # Errors
/// Returns [`Error::NotARuntimeClass`] if the type lacks the Windows Runtime flag,
/// [`Error::ClassNotFound`] if the primary interface is missing, or any decode error.
pub fn assemble(winmd: &WinMd, rid: u32, config: &GeneratorConfig) -> Result<GenData> {
    let type_defs = winmd.table::<TypeDefRaw>();
    let class = type_defs.get(rid)?;
    let runtime_class = identity(winmd, &class)?;

    if !class.is_windows_runtime() {
        return Err(Error::NotARuntimeClass(runtime_class.full_name()));
    }

    info!("Generating {}", runtime_class);

    let package = naming::package_name(&runtime_class.name);
    let primary_name = naming::primary_interface_name(&runtime_class.name);
    let primary = type_defs.get(find_class(
        winmd,
        &naming::qualified_name(&runtime_class.namespace, &primary_name),
    )?)?;

    let mut assembler = Assembler {
        config,
        projector: TypeProjector::new(winmd, config, package.clone()),
        runtime_class,
        diagnostics: Vec::new(),
    };

    let mut types = vec![assembler.interface(&primary, GenTypeKind::Interface)?];

    let optional = [
        (
            config.skip_factory,
            naming::factory_interface_name(&primary_name),
            GenTypeKind::Factory,
        ),
        (
            config.skip_statics,
            naming::statics_interface_name(&primary_name),
            GenTypeKind::Statics,
        ),
    ];

    for (skip, name, kind) in optional {
        if skip {
            debug!("Skipping {} projection of {}", kind, name);
            continue;
        }

        match find_type(winmd, &assembler.runtime_class.namespace, &name)? {
            Some(type_def) => types.push(assembler.interface(&type_def, kind)?),
            None => debug!("No {} interface {}", kind, name),
        }
    }

    Ok(GenData {
        package,
        types,
        imports: assembler.projector.into_imports(),
        diagnostics: assembler.diagnostics,
    })
}
