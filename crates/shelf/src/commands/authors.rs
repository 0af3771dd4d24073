//! Author command handlers.

use shelf_core::{Author, Catalog, EntityId};
use tabled::Tabled;

use crate::cli::{AuthorFields, AuthorsArgs, AuthorsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util;

#[derive(Tabled)]
struct AuthorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Nationality")]
    nationality: String,
}

impl From<&Author> for AuthorRow {
    fn from(a: &Author) -> Self {
        Self {
            id: id_of(a),
            name: a.name.clone(),
            nationality: or_dash(a.nationality.as_deref()),
        }
    }
}

fn id_of(a: &Author) -> String {
    or_dash(a.id.as_ref().map(EntityId::as_str))
}

fn detail(a: &Author) -> String {
    [
        format!("ID:          {}", id_of(a)),
        format!("Name:        {}", a.name),
        format!("Nationality: {}", or_dash(a.nationality.as_deref())),
        format!("Photo:       {}", or_dash(a.photo_url.as_deref())),
        format!("Bio:         {}", or_dash(a.bio.as_deref())),
    ]
    .join("\n")
}

fn is_empty(fields: &AuthorFields) -> bool {
    fields.name.is_none()
        && fields.bio.is_none()
        && fields.nationality.is_none()
        && fields.photo_url.is_none()
}

fn apply(author: &mut Author, fields: AuthorFields) {
    if let Some(name) = fields.name {
        author.name = name;
    }
    if let Some(bio) = fields.bio {
        author.bio = Some(bio);
    }
    if let Some(nationality) = fields.nationality {
        author.nationality = Some(nationality);
    }
    if let Some(photo_url) = fields.photo_url {
        author.photo_url = Some(photo_url);
    }
}

pub async fn handle(
    catalog: &Catalog,
    args: AuthorsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = catalog.authors();

    match args.command {
        AuthorsCommand::List => {
            let authors = store.fetch_all().await?;
            let out = output::render_list(
                global.output,
                authors.as_slice(),
                |a| AuthorRow::from(a),
                id_of,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthorsCommand::Get { id } => {
            let author = store.fetch_one(&EntityId::from(id)).await?;
            let out = output::render_single(global.output, &author, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthorsCommand::Add { fields, from_file } => {
            util::require_admin(catalog, "/admin/authors/new")?;

            let draft = match from_file {
                Some(path) => util::read_json_file::<Author>(&path)?,
                None => {
                    let mut draft = Author::default();
                    apply(&mut draft, fields);
                    draft
                }
            };
            util::require_non_empty("name", &draft.name)?;

            let created = util::notify_failure(catalog, "add author", store.create(draft).await)?;
            catalog.notifier().success("Author added");
            let out = output::render_single(global.output, &created, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthorsCommand::Update {
            id,
            fields,
            from_file,
        } => {
            let id = EntityId::from(id);
            util::require_admin(catalog, &format!("/admin/authors/{id}/edit"))?;

            let mut author = match from_file {
                Some(path) => util::read_json_file::<Author>(&path)?,
                None if is_empty(&fields) => {
                    return Err(CliError::Validation {
                        field: "update".into(),
                        reason: "nothing to change; pass at least one field or --from-file".into(),
                    });
                }
                None => store.fetch_one(&id).await?,
            };
            apply(&mut author, fields);
            author.id = Some(id.clone());
            util::require_non_empty("name", &author.name)?;

            let updated =
                util::notify_failure(catalog, "update author", store.update(&id, author).await)?;
            catalog.notifier().success("Author updated");
            let out = output::render_single(global.output, &updated, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthorsCommand::Delete { id } => {
            util::require_admin(catalog, "/admin/authors")?;
            let result = store.delete(&EntityId::from(id)).await;
            util::notify_failure(catalog, "delete author", result)?;
            catalog.notifier().success("Author deleted");
            Ok(())
        }
    }
}
