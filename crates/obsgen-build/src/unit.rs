use crate::syntax::{CompilationUnit, NamespaceDecl, ToSource};
use obsgen_schema::{node::TypeDescriptor, types::Flavor};

/// First line of every generated unit.
pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated />";

///
/// GeneratedUnit
/// Named source text handed to the host; never modified after creation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedUnit {
    pub name: String,
    pub source: String,
}

impl GeneratedUnit {
    #[must_use]
    pub fn render(name: impl Into<String>, unit: &CompilationUnit) -> Self {
        Self {
            name: name.into(),
            source: unit.to_source_string(),
        }
    }
}

/// `SourceClass{display name}-{Instance|Static}Events.SourceGenerated.cs`
#[must_use]
pub fn unit_name(ty: &TypeDescriptor, flavor: Flavor) -> String {
    format!(
        "SourceClass{}-{flavor}Events.SourceGenerated.cs",
        ty.display_name()
    )
}

/// Combine the non-empty trees in input order. `None` when nothing remains.
#[must_use]
pub fn assemble<I>(trees: I) -> Option<CompilationUnit>
where
    I: IntoIterator<Item = Option<NamespaceDecl>>,
{
    let namespaces: Vec<NamespaceDecl> = trees
        .into_iter()
        .flatten()
        .filter(|ns| !ns.types.is_empty())
        .collect();

    if namespaces.is_empty() {
        return None;
    }

    Some(CompilationUnit {
        header: vec![AUTO_GENERATED_HEADER.to_string()],
        namespaces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TypeDecl;
    use obsgen_schema::node::{EnclosingType, GenericParam};

    fn namespace(name: &str, ty: &str) -> NamespaceDecl {
        NamespaceDecl {
            name: Some(name.to_string()),
            types: vec![TypeDecl::class(ty, vec![])],
        }
    }

    #[test]
    fn empty_inputs_produce_no_unit() {
        assert_eq!(assemble([None, None]), None);
        assert_eq!(
            assemble([Some(NamespaceDecl {
                name: None,
                types: vec![]
            })]),
            None
        );
    }

    #[test]
    fn input_order_is_preserved() {
        let unit = assemble([Some(namespace("Zeta", "B")), None, Some(namespace("Alpha", "A"))])
            .expect("unit");
        let names: Vec<_> = unit.namespaces.iter().map(|n| n.name.as_deref()).collect();

        assert_eq!(names, [Some("Zeta"), Some("Alpha")]);
        assert_eq!(unit.header, [AUTO_GENERATED_HEADER]);
    }

    #[test]
    fn rendered_unit_starts_with_header() {
        let unit = assemble([Some(namespace("App", "RxWidgetEvents"))]).expect("unit");
        let rendered = GeneratedUnit::render("x.cs", &unit);

        assert_eq!(
            rendered.source,
            "// <auto-generated />\n\nnamespace App\n{\n    class RxWidgetEvents\n    {\n    }\n}\n"
        );
    }

    #[test]
    fn unit_names_use_display_form() {
        let ty = TypeDescriptor::class("App", "Inner")
            .with_enclosing(EnclosingType::new("Outer").with_generic(GenericParam::new("T")));

        assert_eq!(
            unit_name(&ty, Flavor::Instance),
            "SourceClassApp.Outer{T}+Inner-InstanceEvents.SourceGenerated.cs"
        );
        assert_eq!(
            unit_name(&ty, Flavor::Static),
            "SourceClassApp.Outer{T}+Inner-StaticEvents.SourceGenerated.cs"
        );
    }
}
