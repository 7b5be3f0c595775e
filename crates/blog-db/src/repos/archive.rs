//! Archive read: articles newest first, paginated, grouped by creation year.

use blog_core::responses::{ArchiveEntry, ArchiveYear, Page, Pagination};
use chrono::Datelike;

use crate::error::ServiceError;
use crate::helpers::get_counter;
use crate::inputs::PageParams;
use crate::query::{Projection, parse_window};
use crate::repos::article::{SELECT_COLS, row_to_article};
use crate::service::BlogService;

impl BlogService {
    /// One page of the archive. Years run newest first, and so do the
    /// articles inside each year.
    ///
    /// # Errors
    ///
    /// `Validation` for bad pagination input, `Storage` on query failure.
    pub async fn archives(
        &self,
        params: &PageParams,
        authorized: bool,
    ) -> Result<Page<ArchiveYear>, ServiceError> {
        let settings = self.settings();
        let (page, limit) = parse_window(
            params.page.as_ref(),
            params.page_size.as_ref(),
            settings.archive_page_size,
            settings.max_page_size,
        )?;
        let where_clause = if authorized { "" } else { "WHERE state = 1" };

        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT count(*) FROM articles {where_clause}"), ())
            .await?;
        let total = match rows.next().await? {
            Some(row) => get_counter(&row, 0)?,
            None => 0,
        };
        drop(rows);

        let offset = i64::from(page - 1) * i64::from(limit);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM articles {where_clause}
                     ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
                ),
                libsql::params![i64::from(limit), offset],
            )
            .await?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next().await? {
            articles.push(row_to_article(&row)?);
        }
        drop(rows);

        self.attach_tag_ids(&mut articles).await?;
        let views = self.populate(articles, Projection::Full).await?;

        let mut years: Vec<ArchiveYear> = Vec::new();
        for view in views {
            let Some(created_at) = view.created_at else {
                continue;
            };
            let entry = ArchiveEntry {
                id: view.id,
                title: view.title.unwrap_or_default(),
                category: view.category,
                tag: view.tag.unwrap_or_default(),
                meta: view.meta.unwrap_or_default(),
                created_at,
                updated_at: view.updated_at.unwrap_or(created_at),
            };
            let year = created_at.year();
            match years.last_mut() {
                Some(group) if group.year == year => group.list.push(entry),
                _ => years.push(ArchiveYear {
                    year,
                    list: vec![entry],
                }),
            }
        }

        Ok(Page {
            list: years,
            pagination: Pagination::new(total, page, limit),
        })
    }
}
