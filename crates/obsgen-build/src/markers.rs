//! Marker declarations the host injects into the consuming compilation.
//!
//! Instance requests are discovered from calls to the catch-all `Events<T>()`
//! overload; static requests from the assembly-level attribute.

use crate::{
    syntax::{
        Attribute, CompilationUnit, Constructor, Expr, GenericParamSyntax, Ident, Member, Method,
        Modifier, NamespaceDecl, ParamModifier, ParamSyntax, Property, PropertyBody, TypeDecl,
        TypeSyntax,
    },
    unit::{AUTO_GENERATED_HEADER, GeneratedUnit},
};
use obsgen_config::ObsgenConfig;

#[must_use]
pub fn unit_name(config: &ObsgenConfig) -> String {
    format!("{}.Markers.SourceGenerated.cs", config.markers.extensions_class)
}

#[must_use]
pub fn generate(config: &ObsgenConfig) -> GeneratedUnit {
    let markers = &config.markers;

    let null_events = TypeDecl::structure(markers.null_events.clone(), vec![Modifier::Internal])
        .with_doc("Returned for types without generated event wrappers.");

    let catch_all = Method {
        doc: Some("Gets observable wrappers for all the events of the type.".to_string()),
        modifiers: vec![Modifier::Public, Modifier::Static],
        return_ty: TypeSyntax::raw(Ident::new(markers.null_events.clone()).to_string()),
        name: Ident::new("Events"),
        generics: vec![GenericParamSyntax {
            name: Ident::new("T"),
            constraints: Vec::new(),
        }],
        params: vec![
            ParamSyntax::new(TypeSyntax::raw("T"), "eventHost").with_modifier(ParamModifier::This),
        ],
        body: Expr::Default,
    };
    let extensions = TypeDecl::class(
        markers.extensions_class.clone(),
        vec![Modifier::Internal, Modifier::Static, Modifier::Partial],
    )
    .with_members(vec![Member::Method(catch_all)]);

    let type_ty = TypeSyntax::raw("global::System.Type");
    let attribute = TypeDecl::class(
        markers.static_attribute.clone(),
        vec![Modifier::Internal, Modifier::Sealed],
    )
    .with_doc("Requests observable wrappers for the static events of a type.")
    .with_attribute(Attribute {
        name: TypeSyntax::raw("global::System.AttributeUsage"),
        args: vec![
            "global::System.AttributeTargets.Assembly".to_string(),
            "AllowMultiple = true".to_string(),
        ],
    })
    .with_base(TypeSyntax::raw("global::System.Attribute"))
    .with_members(vec![
        Member::Constructor(Constructor {
            modifiers: vec![Modifier::Public],
            name: Ident::new(markers.static_attribute.clone()),
            params: vec![ParamSyntax::new(type_ty.clone(), "type")],
            body: vec![Expr::Assign {
                target: Box::new(Expr::path("this")),
                name: Ident::new("Type"),
                value: Box::new(Expr::path("type")),
            }],
        }),
        Member::Property(Property {
            doc: None,
            modifiers: vec![Modifier::Public],
            ty: type_ty,
            name: Ident::new("Type"),
            body: PropertyBody::AutoGet,
        }),
    ]);

    let unit = CompilationUnit {
        header: vec![AUTO_GENERATED_HEADER.to_string()],
        namespaces: vec![NamespaceDecl {
            name: Some(markers.namespace.clone()),
            types: vec![null_events, extensions, attribute],
        }],
    };

    GeneratedUnit::render(unit_name(config), &unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers() {
        let unit = generate(&ObsgenConfig::default());

        assert_eq!(unit.name, "ObservableGeneratorExtensions.Markers.SourceGenerated.cs");
        assert!(unit.source.starts_with("// <auto-generated />\n"));
        assert!(unit.source.contains("namespace ObservableEvents\n"));
        assert!(unit.source.contains("    internal struct NullEvents\n"));
        assert!(unit.source.contains("public static NullEvents Events<T>(this T eventHost)\n"));
        assert!(unit.source.contains("=> default;"));
        assert!(unit.source.contains(
            "[global::System.AttributeUsage(global::System.AttributeTargets.Assembly, AllowMultiple = true)]"
        ));
        assert!(unit.source.contains(
            "internal sealed class GenerateStaticEventObservablesAttribute : global::System.Attribute\n"
        ));
        assert!(unit.source.contains("this.Type = type;"));
        assert!(unit.source.contains("public global::System.Type Type { get; }"));
    }

    #[test]
    fn names_follow_config() {
        let mut config = ObsgenConfig::default();
        config.markers.namespace = "My.Events".to_string();
        config.markers.null_events = "NoEvents".to_string();

        let unit = generate(&config);
        assert!(unit.source.contains("namespace My.Events\n"));
        assert!(unit.source.contains("public static NoEvents Events<T>"));
    }
}
