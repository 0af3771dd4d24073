//! Book command handlers.

use shelf_core::{Book, Catalog, EntityId};
use tabled::Tabled;

use crate::cli::{BookFields, BooksArgs, BooksCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Year")]
    year: String,
}

impl From<&Book> for BookRow {
    fn from(b: &Book) -> Self {
        Self {
            id: id_of(b),
            title: b.title.clone(),
            author: or_dash(b.author_id.as_ref().map(EntityId::as_str)),
            year: b.published_year.map_or_else(|| "-".into(), |y| y.to_string()),
        }
    }
}

fn id_of(b: &Book) -> String {
    or_dash(b.id.as_ref().map(EntityId::as_str))
}

fn detail(b: &Book) -> String {
    [
        format!("ID:          {}", id_of(b)),
        format!("Title:       {}", b.title),
        format!(
            "Author ID:   {}",
            or_dash(b.author_id.as_ref().map(EntityId::as_str))
        ),
        format!(
            "Published:   {}",
            b.published_year.map_or_else(|| "-".into(), |y| y.to_string())
        ),
        format!("Cover:       {}", or_dash(b.cover_url.as_deref())),
        format!("Description: {}", or_dash(b.description.as_deref())),
    ]
    .join("\n")
}

// ── Field editing ───────────────────────────────────────────────────

fn is_empty(fields: &BookFields) -> bool {
    fields.title.is_none()
        && fields.author_id.is_none()
        && fields.description.is_none()
        && fields.year.is_none()
        && fields.cover_url.is_none()
}

fn apply(book: &mut Book, fields: BookFields) {
    if let Some(title) = fields.title {
        book.title = title;
    }
    if let Some(author_id) = fields.author_id {
        book.author_id = Some(EntityId::from(author_id));
    }
    if let Some(description) = fields.description {
        book.description = Some(description);
    }
    if let Some(year) = fields.year {
        book.published_year = Some(year);
    }
    if let Some(cover_url) = fields.cover_url {
        book.cover_url = Some(cover_url);
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: BooksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = catalog.books();

    match args.command {
        BooksCommand::List => {
            let books = store.fetch_all().await?;
            let out = output::render_list(
                global.output,
                books.as_slice(),
                |b| BookRow::from(b),
                id_of,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BooksCommand::Get { id } => {
            let book = store.fetch_one(&EntityId::from(id)).await?;
            let out = output::render_single(global.output, &book, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BooksCommand::Add { fields, from_file } => {
            util::require_admin(catalog, "/admin/books/new")?;

            let draft = match from_file {
                Some(path) => util::read_json_file::<Book>(&path)?,
                None => {
                    let mut draft = Book::default();
                    apply(&mut draft, fields);
                    draft
                }
            };
            util::require_non_empty("title", &draft.title)?;

            let created = util::notify_failure(catalog, "add book", store.create(draft).await)?;
            catalog.notifier().success("Book added");
            let out = output::render_single(global.output, &created, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BooksCommand::Update {
            id,
            fields,
            from_file,
        } => {
            let id = EntityId::from(id);
            util::require_admin(catalog, &format!("/admin/books/{id}/edit"))?;

            let mut book = match from_file {
                Some(path) => util::read_json_file::<Book>(&path)?,
                None if is_empty(&fields) => {
                    return Err(CliError::Validation {
                        field: "update".into(),
                        reason: "nothing to change; pass at least one field or --from-file".into(),
                    });
                }
                None => store.fetch_one(&id).await?,
            };
            apply(&mut book, fields);
            book.id = Some(id.clone());
            util::require_non_empty("title", &book.title)?;

            let updated =
                util::notify_failure(catalog, "update book", store.update(&id, book).await)?;
            catalog.notifier().success("Book updated");
            let out = output::render_single(global.output, &updated, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BooksCommand::Delete { id } => {
            util::require_admin(catalog, "/admin/books")?;
            let result = store.delete(&EntityId::from(id)).await;
            util::notify_failure(catalog, "delete book", result)?;
            catalog.notifier().success("Book deleted");
            Ok(())
        }
    }
}
