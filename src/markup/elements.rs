//! Canned HTML elements and form sections.
//!
//! Everything here returns a string; nothing is written to any stream.
//! The markup is deliberately the old uppercase dialect the rest of the
//! site still uses.

/// `<TITLE>` element combining the site name with a page name.
pub fn title_element(site: &str, content: &str) -> String {
    format!("<TITLE>{} - {}</TITLE>", site, content)
}

/// `<H1>` heading.
pub fn h1(content: &str) -> String {
    format!("<H1>{}</H1>", content)
}

/// Horizontal rule.
pub fn hr() -> &'static str {
    "<HR>"
}

/// Anchor element.
pub fn anchor(link: &str, content: &str) -> String {
    format!("<A HREF=\"{}\">{}</A>", link, content)
}

/// One labeled field line, `NULL` when the value is absent.
pub fn field_line(label: &str, value: Option<&str>) -> String {
    format!("<B>{}</B>\t{}<BR>", label, value.unwrap_or("NULL"))
}

/// Retrieve/reset button row for query forms.
pub fn retrieve_section() -> &'static str {
    "<HR>\n\
     <INPUT TYPE=submit VALUE=\"Retrieve\"> <INPUT TYPE=reset VALUE=\"Reset Form\">\n\
     <HR>\n"
}

/// Radio group limiting how many items a query returns.
pub fn max_return_section() -> &'static str {
    "<b>Max number of items returned:</b>\n\
     <INPUT TYPE=\"radio\" NAME=\"*limit\" VALUE=\"10\">10\n\
     <INPUT TYPE=\"radio\" NAME=\"*limit\" VALUE=\"100\" CHECKED>100\n\
     <INPUT TYPE=\"radio\" NAME=\"*limit\" VALUE=\"500\">500\n\
     <INPUT TYPE=\"radio\" NAME=\"*limit\" VALUE=\"0\">No limit\n\
     <BR>\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_combines_site_and_page() {
        assert_eq!(
            title_element("Informatics", "Allele Query"),
            "<TITLE>Informatics - Allele Query</TITLE>"
        );
    }

    #[test]
    fn field_line_shows_null_for_missing_value() {
        assert_eq!(field_line("Symbol", Some("Pax6")), "<B>Symbol</B>\tPax6<BR>");
        assert_eq!(field_line("Symbol", None), "<B>Symbol</B>\tNULL<BR>");
    }

    #[test]
    fn anchor_wraps_link() {
        assert_eq!(anchor("/help", "Help"), "<A HREF=\"/help\">Help</A>");
    }
}
