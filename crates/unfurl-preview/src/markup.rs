//! HTML escaping and a small head/body builder shared by all documents.

/// Escapes `&`, `<`, `>`, `"` and `'` for use in element text and
/// double-quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Incrementally writes `<!DOCTYPE html>` through `</head>`. Every value
/// passed to a tag method is escaped; only [`Head::raw`] is not.
pub(crate) struct Head {
    buf: String,
}

impl Head {
    pub(crate) fn new(lang: &str, open_graph_prefix: bool) -> Self {
        let mut buf = String::with_capacity(4096);
        buf.push_str("<!DOCTYPE html>\n<html lang=\"");
        buf.push_str(&escape_html(lang));
        buf.push('"');
        if open_graph_prefix {
            buf.push_str(" prefix=\"og: https://ogp.me/ns#\"");
        }
        buf.push_str(">\n<head>\n");
        buf.push_str("    <meta charset=\"UTF-8\">\n");
        buf.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        Self { buf }
    }

    pub(crate) fn title(&mut self, title: &str) -> &mut Self {
        self.buf.push_str("    <title>");
        self.buf.push_str(&escape_html(title));
        self.buf.push_str("</title>\n");
        self
    }

    pub(crate) fn name(&mut self, name: &str, content: &str) -> &mut Self {
        self.tag("name", name, content)
    }

    pub(crate) fn property(&mut self, property: &str, content: &str) -> &mut Self {
        self.tag("property", property, content)
    }

    pub(crate) fn link(&mut self, rel: &str, href: &str) -> &mut Self {
        self.buf.push_str("    <link rel=\"");
        self.buf.push_str(&escape_html(rel));
        self.buf.push_str("\" href=\"");
        self.buf.push_str(&escape_html(href));
        self.buf.push_str("\">\n");
        self
    }

    pub(crate) fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    /// Closes the head, appends `body` verbatim, and closes the document.
    pub(crate) fn finish(mut self, body: &str) -> String {
        self.buf.push_str("</head>\n<body>\n");
        self.buf.push_str(body);
        self.buf.push_str("</body>\n</html>\n");
        self.buf
    }

    fn tag(&mut self, attr: &str, key: &str, content: &str) -> &mut Self {
        self.buf.push_str("    <meta ");
        self.buf.push_str(attr);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape_html(key));
        self.buf.push_str("\" content=\"");
        self.buf.push_str(&escape_html(content));
        self.buf.push_str("\">\n");
        self
    }
}
