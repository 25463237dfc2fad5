use super::*;

fn modifiers(w: &mut SourceWriter, modifiers: &[Modifier]) {
    for modifier in modifiers {
        w.write(&modifier.to_string());
        w.write(" ");
    }
}

fn doc(w: &mut SourceWriter, doc: Option<&str>) {
    let Some(doc) = doc else {
        return;
    };

    let escaped = doc
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    w.line("/// <summary>");
    for line in escaped.lines() {
        w.line(&format!("/// {line}"));
    }
    w.line("/// </summary>");
}

fn generic_list(generics: &[GenericParamSyntax]) -> String {
    if generics.is_empty() {
        return String::new();
    }

    let names: Vec<String> = generics.iter().map(|g| g.name.to_string()).collect();
    format!("<{}>", names.join(", "))
}

// One indented `where` line per constrained parameter.
fn where_clauses(w: &mut SourceWriter, generics: &[GenericParamSyntax]) {
    w.indent();
    for param in generics.iter().filter(|g| !g.constraints.is_empty()) {
        w.line(&format!(
            "where {} : {}",
            param.name,
            param.constraints.join(", ")
        ));
    }
    w.dedent();
}

fn params(params: &[ParamSyntax]) -> String {
    params
        .iter()
        .map(|p| match p.modifier {
            Some(modifier) => format!("{modifier} {} {}", p.ty, p.name),
            None => format!("{} {}", p.ty, p.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToSource for Expr {
    fn to_source(&self, w: &mut SourceWriter) {
        match self {
            Self::Path(text) => w.write(text),
            Self::Member { target, name } => {
                target.to_source(w);
                w.write(".");
                w.write(&name.to_string());
            }
            Self::New { ty, args } => {
                w.write("new ");
                w.write(ty.as_str());
                w.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        w.write(", ");
                    }
                    arg.to_source(w);
                }
                w.write(")");
            }
            Self::Tuple(items) => {
                w.write("(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.write(", ");
                    }
                    item.to_source(w);
                }
                w.write(")");
            }
            Self::TypeOf(ty) => {
                w.write("typeof(");
                w.write(ty.as_str());
                w.write(")");
            }
            Self::Assign {
                target,
                name,
                value,
            } => {
                target.to_source(w);
                w.write(".");
                w.write(&name.to_string());
                w.write(" = ");
                value.to_source(w);
            }
            Self::Default => w.write("default"),
            Self::FromEvent(from_event) => from_event.to_source(w),
        }
    }
}

impl ToSource for FromEvent {
    fn to_source(&self, w: &mut SourceWriter) {
        w.write(&format!("{}<{}, {}>(", self.factory, self.delegate, self.element));
        w.newline();
        w.indent();

        w.line("eventHandler =>");
        w.line("{");
        w.indent();
        w.write(&format!(
            "void Handler({}) => eventHandler(",
            params(&self.handler_params)
        ));
        self.payload.to_source(w);
        w.line(");");
        w.line("return Handler;");
        w.dedent();
        w.line("},");

        w.write("x => ");
        self.event.to_source(w);
        w.line(" += x,");
        w.write("x => ");
        self.event.to_source(w);
        w.write(" -= x)");

        w.dedent();
    }
}

impl ToSource for Field {
    fn to_source(&self, w: &mut SourceWriter) {
        modifiers(w, &self.modifiers);
        w.line(&format!("{} {};", self.ty, self.name));
    }
}

impl ToSource for Constructor {
    fn to_source(&self, w: &mut SourceWriter) {
        modifiers(w, &self.modifiers);
        w.line(&format!("{}({})", self.name, params(&self.params)));
        w.block(|w| {
            for statement in &self.body {
                statement.to_source(w);
                w.line(";");
            }
        });
    }
}

impl ToSource for Property {
    fn to_source(&self, w: &mut SourceWriter) {
        doc(w, self.doc.as_deref());
        modifiers(w, &self.modifiers);
        w.write(&format!("{} {}", self.ty, self.name));

        match &self.body {
            PropertyBody::AutoGet => w.line(" { get; }"),
            PropertyBody::Expr(expr) => {
                w.write(" => ");
                expr.to_source(w);
                w.line(";");
            }
        }
    }
}

impl ToSource for Method {
    fn to_source(&self, w: &mut SourceWriter) {
        doc(w, self.doc.as_deref());
        modifiers(w, &self.modifiers);
        w.line(&format!(
            "{} {}{}({})",
            self.return_ty,
            self.name,
            generic_list(&self.generics),
            params(&self.params)
        ));
        where_clauses(w, &self.generics);

        w.indent();
        w.write("=> ");
        self.body.to_source(w);
        w.line(";");
        w.dedent();
    }
}

impl ToSource for Member {
    fn to_source(&self, w: &mut SourceWriter) {
        match self {
            Self::Field(field) => field.to_source(w),
            Self::Constructor(ctor) => ctor.to_source(w),
            Self::Property(property) => property.to_source(w),
            Self::Method(method) => method.to_source(w),
            Self::Type(decl) => decl.to_source(w),
        }
    }
}

impl ToSource for TypeDecl {
    fn to_source(&self, w: &mut SourceWriter) {
        doc(w, self.doc.as_deref());
        for attribute in &self.attributes {
            if attribute.args.is_empty() {
                w.line(&format!("[{}]", attribute.name));
            } else {
                w.line(&format!("[{}({})]", attribute.name, attribute.args.join(", ")));
            }
        }

        modifiers(w, &self.modifiers);
        w.write(&format!(
            "{} {}{}",
            self.keyword,
            self.name,
            generic_list(&self.generics)
        ));
        if let Some(base) = &self.base {
            w.write(&format!(" : {base}"));
        }
        w.newline();
        where_clauses(w, &self.generics);

        w.block(|w| {
            for (i, member) in self.members.iter().enumerate() {
                if i > 0 {
                    w.newline();
                }
                member.to_source(w);
            }
        });
    }
}

impl ToSource for NamespaceDecl {
    fn to_source(&self, w: &mut SourceWriter) {
        let types = |w: &mut SourceWriter| {
            for (i, decl) in self.types.iter().enumerate() {
                if i > 0 {
                    w.newline();
                }
                decl.to_source(w);
            }
        };

        match &self.name {
            Some(name) => {
                let escaped: Vec<String> = name
                    .split('.')
                    .map(|segment| Ident::new(segment).to_string())
                    .collect();
                w.line(&format!("namespace {}", escaped.join(".")));
                w.block(types);
            }
            None => types(w),
        }
    }
}

impl ToSource for CompilationUnit {
    fn to_source(&self, w: &mut SourceWriter) {
        for line in &self.header {
            w.line(line);
        }

        for namespace in &self.namespaces {
            w.newline();
            namespace.to_source(w);
        }
    }
}
