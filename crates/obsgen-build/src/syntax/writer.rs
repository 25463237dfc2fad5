const INDENT: &str = "    ";

///
/// SourceWriter
/// Line-oriented text sink with block indentation.
///

#[derive(Debug, Default)]
pub struct SourceWriter {
    out: String,
    depth: usize,
    at_line_start: bool,
}

impl SourceWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
            at_line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.at_line_start = false;
        }

        self.out.push_str(text);
    }

    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    pub const fn indent(&mut self) {
        self.depth += 1;
    }

    pub const fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// `{`, indented body, `}` each on their own lines.
    pub fn block<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line("{");
        self.indent();
        body(self);
        self.dedent();
        self.line("}");
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

///
/// ToSource
///

pub trait ToSource {
    fn to_source(&self, w: &mut SourceWriter);

    fn to_source_string(&self) -> String {
        let mut w = SourceWriter::new();
        self.to_source(&mut w);

        w.finish()
    }
}
