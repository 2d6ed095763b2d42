//! Lazy search results
//!
//! Iterators fetch one page per remote call, only when the buffered page runs
//! out. [`continuation_token`](FileIterator::continuation_token) captures the
//! position so a later call can resume where this one stopped.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

use crate::client::ListQuery;
use crate::context::DriveContext;
use crate::error::{ReDriveError, Result};
use crate::file::FileHandle;
use crate::folder::FolderHandle;
use crate::types::Resource;

const PAGE_SIZE: u32 = 100;

/// Serialized resume position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Cursor {
    q: String,
    page_token: Option<String>,
    skip: usize,
}

struct Pager {
    ctx: Arc<DriveContext>,
    query: String,
    /// Token the buffered page was (or will first be) fetched with
    current_page: Option<String>,
    next_page: Option<String>,
    buffer: VecDeque<Resource>,
    consumed: usize,
    pending_skip: usize,
    started: bool,
    exhausted: bool,
}

impl Pager {
    fn new(ctx: Arc<DriveContext>, query: String) -> Self {
        Self::at(ctx, Cursor {
            q: query,
            page_token: None,
            skip: 0,
        })
    }

    fn from_token(ctx: Arc<DriveContext>, token: &str) -> Result<Self> {
        let cursor: Cursor = serde_json::from_str(token)
            .map_err(|e| ReDriveError::ParseError(format!("invalid continuation token: {}", e)))?;
        Ok(Self::at(ctx, cursor))
    }

    fn at(ctx: Arc<DriveContext>, cursor: Cursor) -> Self {
        Self {
            ctx,
            query: cursor.q,
            current_page: cursor.page_token,
            next_page: None,
            buffer: VecDeque::new(),
            consumed: 0,
            pending_skip: cursor.skip,
            started: false,
            exhausted: false,
        }
    }

    async fn fill(&mut self) -> Result<()> {
        while self.buffer.is_empty() && !self.exhausted {
            let page_token = if self.started {
                match &self.next_page {
                    Some(token) => Some(token.clone()),
                    None => {
                        self.exhausted = true;
                        break;
                    }
                }
            } else {
                self.current_page.clone()
            };

            // Position only advances once the page arrived
            let page = self
                .ctx
                .client
                .list(&ListQuery {
                    q: self.query.clone(),
                    page_token: page_token.clone(),
                    page_size: Some(PAGE_SIZE),
                })
                .await?;

            self.started = true;
            self.current_page = page_token;
            self.buffer = page.items.into();
            self.next_page = page.next_page_token;

            let skip = self.pending_skip.min(self.buffer.len());
            self.buffer.drain(..skip);
            self.consumed = skip;
            self.pending_skip = 0;

            debug!(
                buffered = self.buffer.len(),
                has_more = self.next_page.is_some(),
                "Fetched result page"
            );
        }
        Ok(())
    }

    async fn has_next(&mut self) -> Result<bool> {
        self.fill().await?;
        Ok(!self.buffer.is_empty())
    }

    async fn next(&mut self) -> Result<Option<Resource>> {
        self.fill().await?;
        let item = self.buffer.pop_front();
        if item.is_some() {
            self.consumed += 1;
        }
        Ok(item)
    }

    fn cursor(&self) -> Option<Cursor> {
        if !self.started {
            return Some(Cursor {
                q: self.query.clone(),
                page_token: self.current_page.clone(),
                skip: self.pending_skip,
            });
        }
        if !self.buffer.is_empty() {
            return Some(Cursor {
                q: self.query.clone(),
                page_token: self.current_page.clone(),
                skip: self.consumed,
            });
        }
        self.next_page.as_ref().map(|token| Cursor {
            q: self.query.clone(),
            page_token: Some(token.clone()),
            skip: 0,
        })
    }

    fn continuation_token(&self) -> Result<Option<String>> {
        self.cursor()
            .map(|cursor| {
                serde_json::to_string(&cursor).map_err(|e| {
                    ReDriveError::ParseError(format!("failed to encode continuation token: {}", e))
                })
            })
            .transpose()
    }
}

/// Files matching a search, fetched lazily
pub struct FileIterator {
    pager: Pager,
}

impl FileIterator {
    pub(crate) fn new(ctx: Arc<DriveContext>, query: String) -> Self {
        Self {
            pager: Pager::new(ctx, query),
        }
    }

    pub(crate) fn resume(ctx: Arc<DriveContext>, token: &str) -> Result<Self> {
        Ok(Self {
            pager: Pager::from_token(ctx, token)?,
        })
    }

    /// Whether another file is available; may fetch one page.
    pub async fn has_next(&mut self) -> Result<bool> {
        self.pager.has_next().await
    }

    pub async fn next(&mut self) -> Result<Option<FileHandle>> {
        match self.pager.next().await? {
            Some(resource) => Ok(Some(FileHandle::from_resource(
                Arc::clone(&self.pager.ctx),
                &resource,
            )?)),
            None => Ok(None),
        }
    }

    /// Opaque resume position, or `None` once every result was consumed.
    pub fn continuation_token(&self) -> Result<Option<String>> {
        self.pager.continuation_token()
    }
}

/// Folders matching a search, fetched lazily
pub struct FolderIterator {
    pager: Pager,
}

impl FolderIterator {
    pub(crate) fn new(ctx: Arc<DriveContext>, query: String) -> Self {
        Self {
            pager: Pager::new(ctx, query),
        }
    }

    pub(crate) fn resume(ctx: Arc<DriveContext>, token: &str) -> Result<Self> {
        Ok(Self {
            pager: Pager::from_token(ctx, token)?,
        })
    }

    pub async fn has_next(&mut self) -> Result<bool> {
        self.pager.has_next().await
    }

    pub async fn next(&mut self) -> Result<Option<FolderHandle>> {
        match self.pager.next().await? {
            Some(resource) => Ok(Some(FolderHandle::from_file(FileHandle::from_resource(
                Arc::clone(&self.pager.ctx),
                &resource,
            )?))),
            None => Ok(None),
        }
    }

    pub fn continuation_token(&self) -> Result<Option<String>> {
        self.pager.continuation_token()
    }
}
