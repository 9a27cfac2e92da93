//! Generic page controller: fetch a primary collection plus its reference
//! collections, then present the rows as a grid.
//!
//! # Design
//! A `Page` knows which collections it needs and how to turn them into a
//! `Grid`. `PageController` owns the fetched state for one page and moves
//! between two observable states, `Loading` and `Loaded`. Every collection
//! fetch is fault-isolated: a failure is logged, recorded on the loaded
//! state and replaced by an empty page, so one broken reference collection
//! never blanks the primary rows.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::endpoints::ListQuery;
use crate::error::ApiError;
use crate::grid::Grid;
use crate::resource::{Resource, ResourceKind};
use crate::types::Paginated;

/// A collection request that failed and was substituted with an empty page.
#[derive(Debug)]
pub struct FetchFailure {
    pub resource: ResourceKind,
    pub error: ApiError,
}

/// Outcome of one fault-isolated collection fetch.
#[derive(Debug)]
pub struct Fetched<R> {
    pub page: Paginated<R>,
    pub failure: Option<FetchFailure>,
}

impl<R> Fetched<R> {
    pub fn records(&self) -> &[R] {
        &self.page.results
    }
}

/// List the first page of `R`, substituting an empty page on any error.
pub async fn fetch_or_empty<R: Resource>(client: &ApiClient) -> Fetched<R> {
    match client.list::<R>(&ListQuery::new()).await {
        Ok(page) => Fetched { page, failure: None },
        Err(error) => {
            warn!(resource = %R::KIND, %error, "collection fetch failed, rendering without it");
            Fetched {
                page: Paginated::empty(),
                failure: Some(FetchFailure {
                    resource: R::KIND,
                    error,
                }),
            }
        }
    }
}

/// Gather the failures taken out of several `Fetched` values.
pub fn collect_failures(
    failures: impl IntoIterator<Item = Option<FetchFailure>>,
) -> Vec<FetchFailure> {
    failures.into_iter().flatten().collect()
}

/// One screen of the console.
#[async_trait]
pub trait Page: Send + Sync {
    type Data: Send + Sync;

    fn title(&self) -> &'static str;

    /// Fetch everything the page needs, concurrently.
    async fn fetch(&self, client: &ApiClient) -> (Self::Data, Vec<FetchFailure>);

    /// Denormalize the fetched data into display rows.
    fn grid(&self, data: &Self::Data) -> Grid;
}

/// Data of a page that finished loading, possibly partially empty.
#[derive(Debug)]
pub struct Loaded<D> {
    pub data: D,
    pub failures: Vec<FetchFailure>,
}

impl<D> Loaded<D> {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub enum PageState<'a, D> {
    Loading,
    Loaded(&'a Loaded<D>),
}

/// Owns one page's fetched state. Loading takes `&mut self`, so a refresh
/// can never race an earlier load into the same state.
pub struct PageController<P: Page> {
    page: P,
    client: ApiClient,
    loaded: Option<Loaded<P::Data>>,
}

impl<P: Page> PageController<P> {
    pub fn new(page: P, client: ApiClient) -> Self {
        Self {
            page,
            client,
            loaded: None,
        }
    }

    pub fn title(&self) -> &'static str {
        self.page.title()
    }

    pub fn state(&self) -> PageState<'_, P::Data> {
        match &self.loaded {
            Some(loaded) => PageState::Loaded(loaded),
            None => PageState::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loaded.is_none()
    }

    /// Fetch the page's collections and commit them.
    pub async fn activate(&mut self) -> &Loaded<P::Data> {
        self.loaded = None;
        let (data, failures) = self.page.fetch(&self.client).await;
        debug!(page = self.page.title(), failures = failures.len(), "page loaded");
        self.loaded.insert(Loaded { data, failures })
    }

    /// Repeat the fetch sequence.
    pub async fn refresh(&mut self) -> &Loaded<P::Data> {
        self.activate().await
    }

    pub fn loaded(&self) -> Option<&Loaded<P::Data>> {
        self.loaded.as_ref()
    }

    /// The grid for the current data, or `None` while loading.
    pub fn grid(&self) -> Option<Grid> {
        self.loaded().map(|loaded| self.page.grid(&loaded.data))
    }

    /// Consume the controller, keeping only the rendered grid and failures.
    pub fn into_grid(self) -> Loaded<Grid> {
        match self.loaded {
            Some(loaded) => Loaded {
                data: self.page.grid(&loaded.data),
                failures: loaded.failures,
            },
            None => Loaded {
                data: Grid::new(self.page.title(), &[]),
                failures: Vec::new(),
            },
        }
    }
}
