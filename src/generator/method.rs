//! Projection of one interface method into a [`GenFunc`].

use log::warn;

use crate::{
    generator::{
        ir::{Diagnostic, GenFunc, GenParam, ParamName, Projection, TypeIdentity},
        projection::TypeProjector,
    },
    metadata::{
        signatures::{SignatureParameter, TypeSignature},
        tables::{MethodDefRaw, ParamRaw},
    },
    Result,
};

/// The interface a method is projected from, and the class it is generated for.
pub struct InterfaceContext<'c> {
    /// The interface declaring the methods
    pub interface: &'c TypeIdentity,
    /// GUID of `interface`
    pub guid: Option<&'c str>,
    /// The runtime class being generated
    pub runtime_class: &'c TypeIdentity,
}

/// The name of signature parameter `position`: the `IN` parameter row with sequence
/// `position + 1`.
fn resolve_param_name(params: &[ParamRaw], position: usize, projector: &TypeProjector) -> Result<ParamName> {
    let sequence = position + 1;

    match params
        .iter()
        .find(|param| param.is_in() && param.sequence as usize == sequence)
    {
        Some(param) => Ok(ParamName::Resolved(
            param.name(projector.winmd())?.to_string(),
        )),
        None => Ok(ParamName::Unresolved),
    }
}

fn check_projection(
    projection: &Projection,
    context: impl FnOnce() -> String,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Projection::Unsupported(kind) = projection {
        let diagnostic = Diagnostic::UnsupportedElement {
            context: context(),
            kind: *kind,
        };
        warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
    }
}

/// Project `method` of `context.interface` into a [`GenFunc`].
///
/// One [`GenParam`] is built per signature parameter; by-reference parameters project their
/// element type. The return parameter is omitted for `void` methods. Unresolved parameter
/// names and unsupported element kinds are recorded in `diagnostics`.
///
/// # Errors
/// Returns an error if the parameter rows, the signature or a name cannot be decoded.
pub fn project_method(
    projector: &mut TypeProjector<'_>,
    context: &InterfaceContext<'_>,
    method: &MethodDefRaw,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<GenFunc> {
    let winmd = projector.winmd();
    let name = method.name(winmd)?;
    let params = method.params(winmd)?;
    let signature = method.signature(winmd)?;
    let qualified = || format!("{}.{}", context.interface.name, name);

    let mut in_params = Vec::with_capacity(signature.params.len());
    for (position, SignatureParameter { base, .. }) in signature.params.iter().enumerate() {
        let param_name = resolve_param_name(&params, position, projector)?;
        if param_name == ParamName::Unresolved {
            let diagnostic = Diagnostic::UnresolvedParamName {
                method: qualified(),
                position,
            };
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }

        let type_name = projector.type_name(base);
        check_projection(
            &type_name,
            || format!("{} parameter {}", qualified(), position),
            diagnostics,
        );

        in_params.push(GenParam {
            name: param_name,
            type_name,
            default_value: None,
        });
    }

    let return_type = &signature.return_type.base;
    let return_param = if *return_type == TypeSignature::Void {
        None
    } else {
        let type_name = projector.type_name(return_type);
        check_projection(&type_name, || format!("{} return", qualified()), diagnostics);

        Some(GenParam {
            name: ParamName::Resolved(String::new()),
            type_name,
            default_value: Some(projector.default_value(return_type)),
        })
    };

    Ok(GenFunc {
        name: name.to_string(),
        is_constructor: false,
        in_params,
        return_param,
        parent_type: context.interface.clone(),
        parent_guid: context.guid.map(str::to_string),
        runtime_class: context.runtime_class.clone(),
        declaring_type: Some(context.interface.name.clone()),
    })
}
