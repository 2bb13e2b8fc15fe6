//! The standard page builder.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fragment emitted before everything else in the document head.
pub const TEMPLATE_HEAD: &str = "templateHead.html";
/// Fragment opening the document body.
pub const TEMPLATE_BODY_START: &str = "templateBodyStart.html";
/// Fragment closing the document body.
pub const TEMPLATE_BODY_STOP: &str = "templateBodyStop.html";

/// Error type for page assembly.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template fragment could not be read.
    #[error("failed to read template fragment {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Builder for a standard site page.
///
/// A `Page` is bound to a directory of template fragments and collects
/// the variable sections of a document. The assembly methods combine
/// both into HTML.
#[derive(Debug, Clone)]
pub struct Page {
    path: PathBuf,
    content_type: String,
    cookies: String,
    title: String,
    help_link: String,
    header_text: String,
    header_sub_text: String,
    input_form_url: String,
    input_form_parameters: BTreeMap<String, String>,
    body: Vec<String>,
    css: Vec<String>,
    javascript_includes: Vec<String>,
    javascript: Vec<String>,
}

impl Page {
    /// Create a page bound to the given template directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content_type: "Content-type: text/html\n".to_owned(),
            cookies: String::new(),
            title: String::new(),
            help_link: String::new(),
            header_text: String::new(),
            header_sub_text: String::new(),
            input_form_url: String::new(),
            input_form_parameters: BTreeMap::new(),
            body: Vec::new(),
            css: Vec::new(),
            javascript_includes: Vec::new(),
            javascript: Vec::new(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
    }

    /// Cookie headers, with the trailing blank line the CGI protocol
    /// expects.
    pub fn cookies(&self) -> String {
        format!("{}\n", self.cookies)
    }

    pub fn set_cookies(&mut self, cookies: impl Into<String>) {
        self.cookies = cookies.into();
    }

    /// The `<TITLE>` element for the current title, empty when no title
    /// has been set.
    pub fn title(&self) -> String {
        if self.title.is_empty() {
            String::new()
        } else {
            format!("<TITLE>{}</TITLE>", self.title)
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn set_body(&mut self, body: Vec<String>) {
        self.body = body;
    }

    pub fn append_body(&mut self, piece: impl Into<String>) {
        self.body.push(piece.into());
    }

    /// Replace the style sheets with a single link.
    pub fn set_css(&mut self, url: &str) {
        self.css = vec![css_link(url)];
    }

    pub fn append_css(&mut self, url: &str) {
        self.css.push(css_link(url));
    }

    /// Replace the script includes with a single one.
    pub fn set_javascript_include(&mut self, url: &str) {
        self.javascript_includes = vec![script_include(url)];
    }

    pub fn append_javascript_include(&mut self, url: &str) {
        self.javascript_includes.push(script_include(url));
    }

    pub fn set_javascript(&mut self, script: impl Into<String>) {
        self.javascript = vec![script.into()];
    }

    pub fn append_javascript(&mut self, script: impl Into<String>) {
        self.javascript.push(script.into());
    }

    pub fn help_link(&self) -> &str {
        &self.help_link
    }

    /// Point the header bar at a user-doc page; a help image appears on
    /// the page when this is set.
    pub fn set_help_link(&mut self, url: impl Into<String>) {
        self.help_link = url.into();
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    pub fn set_header_text(&mut self, text: impl Into<String>) {
        self.header_text = text.into();
    }

    pub fn header_sub_text(&self) -> &str {
        &self.header_sub_text
    }

    pub fn set_header_sub_text(&mut self, text: impl Into<String>) {
        self.header_sub_text = text.into();
    }

    pub fn set_input_form_url(&mut self, url: impl Into<String>) {
        self.input_form_url = url.into();
    }

    pub fn input_form_parameters(&self) -> &BTreeMap<String, String> {
        &self.input_form_parameters
    }

    pub fn set_input_form_parameters(&mut self, parameters: BTreeMap<String, String>) {
        self.input_form_parameters = parameters;
    }

    pub fn append_input_form_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.input_form_parameters.insert(name.into(), value.into());
    }

    /// The feedback-button form for the header bar, or an empty string
    /// when no form URL and parameters are configured.
    pub fn input_form(&self) -> String {
        if self.input_form_parameters.is_empty() || self.input_form_url.is_empty() {
            return String::new();
        }
        let query = self
            .input_form_parameters
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");
        format!(
            "<div class=\"yourInputButton\">\n\
             \t<FORM NAME=\"YourInputForm\">\n\
             \t\t<INPUT TYPE=button class=\"searchToolButton\" VALUE=\"Your Input Welcome\" NAME=\"yourInputButton\"\n\
             \t\tonClick='window.open(\"{}?{}\")'>\n\
             \t</FORM>\n\
             </div>",
            self.input_form_url, query
        )
    }

    /// Everything up to and including the body-start fragment: content
    /// type, cookies, head fragment, title, style sheets, and scripts.
    pub fn navigation(&self) -> Result<String, TemplateError> {
        let mut text = String::new();
        text.push_str(&self.content_type);
        text.push_str(&self.cookies());
        text.push_str(&self.fragment(TEMPLATE_HEAD)?);
        text.push_str(&self.title());
        for item in &self.css {
            text.push_str(item);
        }
        for item in &self.javascript_includes {
            text.push_str(item);
        }
        for item in &self.javascript {
            text.push_str(item);
        }
        text.push_str(&self.fragment(TEMPLATE_BODY_START)?);
        Ok(text)
    }

    /// The title bar: main text, optional sub text, optional help
    /// attribute, and the feedback form when configured.
    pub fn header_bar(&self) -> String {
        let mut head = if self.help_link.is_empty() {
            "<div id=\"titleBarWrapper\">\n".to_owned()
        } else {
            format!("<div id=\"titleBarWrapper\" userdoc=\"{}\">\n", self.help_link)
        };
        head.push_str(&self.input_form());
        head.push_str("<span class=\"titleBarMainTitle\">");
        head.push_str(&self.header_text);
        head.push_str("</span><br>\n");
        if !self.header_sub_text.is_empty() {
            head.push_str("<span class=\"titleBarSubTitle\">");
            head.push_str(&self.header_sub_text);
            head.push_str("</span>\n");
        }
        head.push_str("</div>\n");
        head
    }

    /// Navigation followed by the header bar.
    pub fn navigation_and_header(&self) -> Result<String, TemplateError> {
        let mut head = self.navigation()?;
        head.push_str(&self.header_bar());
        Ok(head)
    }

    /// The whole document.
    pub fn full_document(&self) -> Result<String, TemplateError> {
        let mut doc = self.navigation_and_header()?;
        for item in &self.body {
            doc.push_str(item);
        }
        doc.push_str(&self.fragment(TEMPLATE_BODY_STOP)?);
        Ok(doc)
    }

    /// The whole document, sans header bar.
    pub fn full_document_no_header(&self) -> Result<String, TemplateError> {
        let mut doc = self.navigation()?;
        for item in &self.body {
            doc.push_str(item);
        }
        doc.push_str(&self.fragment(TEMPLATE_BODY_STOP)?);
        Ok(doc)
    }

    fn fragment(&self, name: &str) -> Result<String, TemplateError> {
        let path = self.path.join(name);
        read_fragment(&path)
    }
}

fn read_fragment(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_owned(),
        source,
    })
}

fn css_link(url: &str) -> String {
    format!("<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\"/>", url)
}

fn script_include(url: &str) -> String {
    format!("<script type=\"text/javascript\" src=\"{}\"></script>", url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TEMPLATE_HEAD), "<HTML><HEAD>").unwrap();
        fs::write(dir.path().join(TEMPLATE_BODY_START), "</HEAD><BODY>").unwrap();
        fs::write(dir.path().join(TEMPLATE_BODY_STOP), "</BODY></HTML>").unwrap();
        dir
    }

    #[test]
    fn full_document_assembles_in_order() {
        let dir = template_dir();
        let mut page = Page::new(dir.path());
        page.set_title("Allele Query");
        page.set_header_text("Genome Informatics");
        page.append_body("<P>hello</P>");

        let doc = page.full_document().unwrap();
        let head_pos = doc.find("<HTML><HEAD>").unwrap();
        let title_pos = doc.find("<TITLE>Allele Query</TITLE>").unwrap();
        let body_start_pos = doc.find("</HEAD><BODY>").unwrap();
        let bar_pos = doc.find("titleBarWrapper").unwrap();
        let body_pos = doc.find("<P>hello</P>").unwrap();
        let stop_pos = doc.find("</BODY></HTML>").unwrap();
        assert!(head_pos < title_pos);
        assert!(title_pos < body_start_pos);
        assert!(body_start_pos < bar_pos);
        assert!(bar_pos < body_pos);
        assert!(body_pos < stop_pos);
        assert!(doc.starts_with("Content-type: text/html\n"));
    }

    #[test]
    fn no_header_variant_omits_title_bar() {
        let dir = template_dir();
        let mut page = Page::new(dir.path());
        page.set_header_text("Genome Informatics");
        let doc = page.full_document_no_header().unwrap();
        assert!(!doc.contains("titleBarWrapper"));
    }

    #[test]
    fn header_bar_carries_help_and_sub_text() {
        let mut page = Page::new("unused");
        page.set_header_text("Main");
        page.set_header_sub_text("Sub");
        page.set_help_link("/userdocs/query_help.shtml");
        let bar = page.header_bar();
        assert!(bar.contains("userdoc=\"/userdocs/query_help.shtml\""));
        assert!(bar.contains("<span class=\"titleBarMainTitle\">Main</span>"));
        assert!(bar.contains("<span class=\"titleBarSubTitle\">Sub</span>"));
    }

    #[test]
    fn input_form_needs_url_and_parameters() {
        let mut page = Page::new("unused");
        assert_eq!(page.input_form(), "");

        page.set_input_form_url("/feedback/feedback_form.cgi");
        assert_eq!(page.input_form(), "");

        page.append_input_form_parameter("marker", "Pax6");
        let form = page.input_form();
        assert!(form.contains("window.open(\"/feedback/feedback_form.cgi?marker=Pax6\")"));
    }

    #[test]
    fn missing_fragment_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let page = Page::new(dir.path());
        let err = page.navigation().unwrap_err();
        let TemplateError::Io { path, .. } = err;
        assert!(path.ends_with(TEMPLATE_HEAD));
    }

    #[test]
    fn css_and_scripts_render_into_navigation() {
        let dir = template_dir();
        let mut page = Page::new(dir.path());
        page.set_css("/css/site.css");
        page.append_css("/css/query.css");
        page.append_javascript_include("/js/overlib.js");
        page.set_javascript("var x = 1;");

        let nav = page.navigation().unwrap();
        assert!(nav.contains("href=\"/css/site.css\""));
        assert!(nav.contains("href=\"/css/query.css\""));
        assert!(nav.contains("src=\"/js/overlib.js\""));
        assert!(nav.contains("var x = 1;"));
    }
}
