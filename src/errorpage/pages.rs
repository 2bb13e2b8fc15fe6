//! Canned error pages.

use crate::config::ErrorPageConfig;

/// Renders the site's error pages.
///
/// Title, banner, footer, and support address all have workable
/// defaults; scripts that want their own override them once at startup.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    title: String,
    banner: String,
    footer: String,
    support_email: String,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self {
            title: "Site".to_owned(),
            banner: String::new(),
            footer: String::new(),
            support_email: "webmaster@localhost".to_owned(),
        }
    }
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter carrying the site configuration's title and support
    /// address.
    pub fn from_config(config: &ErrorPageConfig) -> Self {
        let mut reporter = Self::new();
        reporter.set_title(config.title.as_str());
        reporter.set_support_email(config.support_email.as_str());
        reporter
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_banner(&mut self, banner: impl Into<String>) {
        self.banner = banner.into();
    }

    pub fn set_footer(&mut self, footer: impl Into<String>) {
        self.footer = footer.into();
    }

    pub fn set_support_email(&mut self, address: impl Into<String>) {
        self.support_email = address.into();
    }

    /// The standard page shown when a script dies processing a request.
    pub fn server_error_page(&self) -> String {
        self.server_error_page_titled(None)
    }

    /// [`server_error_page`](Self::server_error_page) with the title
    /// overridden for this one call.
    pub fn server_error_page_titled(&self, title: Option<&str>) -> String {
        let title = check(title, &self.title);
        format!(
            "<HTML><HEAD>\n\
             <TITLE>{title} - Server Error</TITLE>\n\
             </HEAD><BODY BGCOLOR=\"#FFFFFF\">\n\
             <CENTER>\n\
             <H1>{title}</H1>\n\
             </CENTER>\n\
             <HR>\n\
             <H2>Server Error</H2>\n\
             An error occurred when the server attempted to process your\n\
             request.  To report the problem, send a message to User\n\
             Support at the following address:<P>\n\
             <CENTER>\n\
             <A HREF=\"mailto:{email}\">{email}</A>\n\
             </CENTER><P>\n\
             Please include the following information in your message:\n\
             <UL>\n\
             <LI>Date and time\n\
             <LI>Brief description of problem\n\
             <LI>WWW Browser and version #\n\
             <LI>Type of computer\n\
             <LI>Query form used and search criteria\n\
             </UL>\n\
             <HR>\n\
             </BODY></HTML>",
            title = title,
            email = self.support_email,
        )
    }

    /// A page reporting a problem with the user's query, with `message`
    /// between the configured banner and footer.
    pub fn query_error_page(&self, message: &str) -> String {
        self.query_error_page_with(message, None, None, None)
    }

    /// [`query_error_page`](Self::query_error_page) with any of the
    /// title, banner, and footer overridden for this one call.
    pub fn query_error_page_with(
        &self,
        message: &str,
        title: Option<&str>,
        banner: Option<&str>,
        footer: Option<&str>,
    ) -> String {
        format!(
            "<HTML><HEAD><TITLE>{title} - Query Error</TITLE></HEAD>\n\
             <BODY BGCOLOR=\"#FFFFFF\">{banner}\n\
             <H2>Query Error</H2>\n\
             {message}<HR>\n\
             {footer}",
            title = check(title, &self.title),
            banner = check(banner, &self.banner),
            message = message,
            footer = check(footer, &self.footer),
        )
    }
}

/// The override when one was given and it is non-empty, the configured
/// value otherwise.
fn check<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => default,
    }
}
