use serde::Serialize;

use super::templates;
use crate::present::RenderedTable;
use crate::service::{ActionError, DeletionReport, DeletionStatus, ListingReport};

const DELETE_CONFIRMATION: &str =
    "Delete every collection of this database? This cannot be undone.";

/// Main area of the inspector page.
#[derive(Debug, Clone, Copy, Default)]
pub enum PageContent<'a> {
    /// Nothing was requested yet.
    #[default]
    Empty,
    /// Every collection rendered, or its inline error.
    Listing(&'a ListingReport),
    /// Outcome of deleting every collection.
    Deletion(&'a DeletionReport),
    /// A failure that halted the whole action.
    Failure(&'a ActionError),
    /// The submitted form could not be read; no action was run.
    Rejected(&'a str),
}

/// The inspector page: a sidebar with the database URL field and the
/// Connect and Delete buttons, next to the results of the last action.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    url: &'a str,
    emphasis_style: &'a str,
    content: PageContent<'a>,
}

impl<'a> Page<'a> {
    /// Creates an empty page.
    pub fn new(emphasis_style: &'a str) -> Self {
        Self {
            url: "",
            emphasis_style,
            content: PageContent::Empty,
        }
    }

    /// Prefills the database URL field.
    pub fn with_url(mut self, url: &'a str) -> Self {
        self.url = url;
        self
    }

    /// Sets the main area.
    pub fn with_content(mut self, content: PageContent<'a>) -> Self {
        self.content = content;
        self
    }

    /// Renders the page to HTML.
    ///
    /// # Errors
    ///
    /// Fails only when the page template is broken.
    pub fn render(&self) -> Result<String, minijinja::Error> {
        templates::render("page.html", self.context())
    }

    fn context(&self) -> PageContext<'a> {
        let mut context = PageContext {
            url: self.url,
            emphasis_style: self.emphasis_style,
            confirmation: DELETE_CONFIRMATION,
            endpoint: None,
            listing: None,
            deletion: None,
            error: None,
        };

        match self.content {
            PageContent::Empty => {}
            PageContent::Listing(report) => {
                context.endpoint = Some(report.endpoint.to_string());
                context.listing = Some(
                    report
                        .collections
                        .iter()
                        .map(|view| Section {
                            name: &view.name,
                            table: view.table(),
                            error: view.failure(),
                        })
                        .collect(),
                );
            }
            PageContent::Deletion(report) => {
                context.endpoint = Some(report.endpoint.to_string());
                context.deletion = Some(
                    report
                        .collections
                        .iter()
                        .map(|outcome| DeletionItem {
                            name: &outcome.name,
                            error: match &outcome.status {
                                DeletionStatus::Deleted => None,
                                DeletionStatus::Failed(message) => Some(message.as_str()),
                            },
                        })
                        .collect(),
                );
            }
            PageContent::Failure(error) => {
                context.endpoint = error.endpoint().map(ToString::to_string);
                context.error = Some(error.to_string());
            }
            PageContent::Rejected(message) => {
                context.error = Some(message.to_owned());
            }
        }

        context
    }
}

/// Values the page template reads.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    url: &'a str,
    emphasis_style: &'a str,
    confirmation: &'static str,
    endpoint: Option<String>,
    listing: Option<Vec<Section<'a>>>,
    deletion: Option<Vec<DeletionItem<'a>>>,
    error: Option<String>,
}

/// One collection of a listing: its table or the reason it has none.
#[derive(Debug, Serialize)]
struct Section<'a> {
    name: &'a str,
    table: Option<&'a RenderedTable>,
    error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeletionItem<'a> {
    name: &'a str,
    error: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use vecscope_chroma::{InvalidEndpoint, Record, RecordSet, StoreError, resolve};

    use super::*;
    use crate::present::{ColumnKind, TablePresenter};
    use crate::service::{CollectionOutcome, CollectionView, DeletionOutcome};

    fn listing() -> ListingReport {
        ListingReport {
            endpoint: resolve("http://localhost:8000").unwrap(),
            collections: vec![
                CollectionView {
                    name: "articles".to_owned(),
                    outcome: CollectionOutcome::Rendered(RenderedTable {
                        columns: ColumnKind::ALL,
                        rows: Vec::new(),
                    }),
                },
                CollectionView {
                    name: "<broken>".to_owned(),
                    outcome: CollectionOutcome::Failed("connection reset".to_owned()),
                },
            ],
        }
    }

    #[test]
    fn empty_page_has_sidebar_only() {
        let html = Page::new("").render().unwrap();
        assert!(html.contains("Database URL"));
        assert!(html.contains(">Connect</button>"));
        assert!(html.contains(">Delete</button>"));
        assert!(html.contains("return confirm("));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn url_is_prefilled_and_escaped() {
        let html = Page::new("").with_url("x\"><script>").render().unwrap();
        assert!(html.contains("value=\"x&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn listing_shows_every_collection() {
        let report = listing();
        let html = Page::new("")
            .with_content(PageContent::Listing(&report))
            .render()
            .unwrap();

        assert!(html.contains("<h2>Connecting to localhost:8000</h2>"));
        assert!(html.contains("<h3>Collection: articles</h3>\n<table>"));
        assert!(html.contains("<h3>Collection: &lt;broken&gt;</h3>"));
        assert!(html.contains("<p class=\"error\">connection reset</p>"));
    }

    #[test]
    fn tables_mark_emphasized_cells() {
        let set: RecordSet = [
            Record::new("a").with_document("<b>"),
            Record::new("b").with_document("x"),
        ]
        .into_iter()
        .collect();
        let table = TablePresenter::default().present(&set).unwrap();
        let report = ListingReport {
            endpoint: resolve("http://localhost:8000").unwrap(),
            collections: vec![CollectionView {
                name: "docs".to_owned(),
                outcome: CollectionOutcome::Rendered(table),
            }],
        };
        let html = Page::new("color: red")
            .with_content(PageContent::Listing(&report))
            .render()
            .unwrap();

        assert!(html.contains("<th>ids</th><th>embeddings</th><th>metadata</th><th>documents</th>"));
        assert!(html.contains("<td class=\"max\" style=\"color: red\">b</td>"));
        assert!(html.contains("<td class=\"max\" style=\"color: red\">&lt;b&gt;</td>"));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn empty_listing_says_so() {
        let report = ListingReport {
            endpoint: resolve("http://localhost:8000").unwrap(),
            collections: Vec::new(),
        };
        let html = Page::new("")
            .with_content(PageContent::Listing(&report))
            .render()
            .unwrap();
        assert!(html.contains("<p>No collections found.</p>"));
    }

    #[test]
    fn deletion_lists_outcomes() {
        let report = DeletionReport {
            endpoint: resolve("http://localhost:8000").unwrap(),
            collections: vec![
                DeletionOutcome {
                    name: "a".to_owned(),
                    status: DeletionStatus::Deleted,
                },
                DeletionOutcome {
                    name: "b".to_owned(),
                    status: DeletionStatus::Failed("locked".to_owned()),
                },
            ],
        };
        let html = Page::new("")
            .with_content(PageContent::Deletion(&report))
            .render()
            .unwrap();

        assert!(html.contains("<li>Deleted collection: a</li>"));
        assert!(html.contains("Failed to delete collection b: locked"));
    }

    #[test]
    fn failures_replace_the_results() {
        let invalid = ActionError::InvalidEndpoint(InvalidEndpoint::MissingPort);
        let html = Page::new("")
            .with_content(PageContent::Failure(&invalid))
            .render()
            .unwrap();
        assert!(!html.contains("Connecting to"));
        assert!(html.contains("url has no port"));

        let unreachable = ActionError::Enumeration {
            endpoint: resolve("http://db:9000").unwrap(),
            source: StoreError::connection("refused"),
        };
        let html = Page::new("")
            .with_content(PageContent::Failure(&unreachable))
            .render()
            .unwrap();
        assert!(html.contains("<h2>Connecting to db:9000</h2>"));
        assert!(html.contains("refused"));
    }

    #[test]
    fn rejected_forms_show_the_reason() {
        let html = Page::new("")
            .with_content(PageContent::Rejected("unknown variant `<bogus>`"))
            .render()
            .unwrap();
        assert!(html.contains("<p class=\"error\">unknown variant `&lt;bogus&gt;`</p>"));
        assert!(!html.contains("<h2>"));
    }
}
