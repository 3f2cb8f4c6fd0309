//! HAL resource representations
//!
//! An entity goes over the wire as its own fields plus a `_links` object.
//! Collections are paged: elements sit under `_embedded.<rel>`, navigation
//! links under `_links`, and counts under `page`.

use std::fmt::Display;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::paging::{Page, PageRequest};
use crate::Error;

/// Media type of every HAL response body
pub const HAL_JSON: &str = "application/hal+json";

pub const SELF_REL: &str = "self";
pub const LIST_REL: &str = "list";
pub const FIRST_REL: &str = "first";
pub const PREV_REL: &str = "prev";
pub const NEXT_REL: &str = "next";
pub const LAST_REL: &str = "last";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Named links, serialized in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    entries: Vec<(String, Link)>,
}

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rel: impl Into<String>, link: Link) -> Self {
        self.push(rel, link);
        self
    }

    /// Add a link, replacing any existing link with the same rel
    pub fn push(&mut self, rel: impl Into<String>, link: Link) {
        let rel = rel.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == rel) {
            Some((_, slot)) => *slot = link,
            None => self.entries.push((rel, link)),
        }
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == rel)
            .map(|(_, link)| link)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(rel, _)| rel.as_str())
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rel, link) in &self.entries {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

/// Builds absolute hrefs below an origin such as `http://localhost:8080`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    href: String,
}

impl LinkBuilder {
    pub fn new(origin: &str) -> Self {
        Self {
            href: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Append one path segment
    pub fn slash(&self, segment: impl Display) -> Self {
        let segment = segment.to_string();
        Self {
            href: format!("{}/{}", self.href, segment.trim_matches('/')),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn to_link(&self) -> Link {
        Link::new(self.href.clone())
    }

    /// Link to one page of the collection at this path
    pub fn page_link(&self, request: PageRequest) -> Link {
        Link::new(format!(
            "{}?page={}&size={}",
            self.href,
            request.page(),
            request.size()
        ))
    }
}

/// One entity plus its links
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityModel<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> EntityModel<T> {
    pub fn new(content: T, links: Links) -> Self {
        Self { content, links }
    }

    pub fn self_link(&self) -> Option<&Link> {
        self.links.get(SELF_REL)
    }
}

/// Counts describing the page a [`PagedModel`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

impl<T> From<&Page<T>> for PageMetadata {
    fn from(page: &Page<T>) -> Self {
        Self {
            size: u64::from(page.size()),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            number: u64::from(page.number()),
        }
    }
}

/// A page of entity models with navigation links
#[derive(Debug, Clone, PartialEq)]
pub struct PagedModel<T> {
    rel: String,
    items: Vec<EntityModel<T>>,
    links: Links,
    page: PageMetadata,
}

impl<T> PagedModel<T> {
    /// Wrap every element with `to_model` and add `first`/`prev`/`self`/
    /// `next`/`last` links for the collection at `collection`.
    ///
    /// `first` and `last` only appear when another page exists in either
    /// direction; `prev` and `next` are omitted at the boundaries.
    pub fn assemble<E>(
        page: Page<E>,
        rel: impl Into<String>,
        collection: &LinkBuilder,
        to_model: impl FnMut(E) -> EntityModel<T>,
    ) -> Self {
        let metadata = PageMetadata::from(&page);
        let request = page.request();
        let navigable = page.has_previous() || page.has_next();

        let mut links = Links::new();
        if navigable {
            links.push(FIRST_REL, collection.page_link(request.first()));
        }
        if page.has_previous() {
            links.push(PREV_REL, collection.page_link(request.previous()));
        }
        links.push(SELF_REL, collection.page_link(request));
        if page.has_next() {
            links.push(NEXT_REL, collection.page_link(request.next()));
        }
        if navigable {
            links.push(
                LAST_REL,
                collection.page_link(request.with_page(page.last_page())),
            );
        }

        Self {
            rel: rel.into(),
            items: page.into_content().into_iter().map(to_model).collect(),
            links,
            page: metadata,
        }
    }

    pub fn items(&self) -> &[EntityModel<T>] {
        &self.items
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn page(&self) -> PageMetadata {
        self.page
    }
}

struct Embedded<'a, T> {
    rel: &'a str,
    items: &'a [EntityModel<T>],
}

impl<T: Serialize> Serialize for Embedded<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.rel, self.items)?;
        map.end()
    }
}

impl<T: Serialize> Serialize for PagedModel<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_items = !self.items.is_empty();
        let fields = if has_items { 3 } else { 2 };

        let mut state = serializer.serialize_struct("PagedModel", fields)?;
        if has_items {
            state.serialize_field(
                "_embedded",
                &Embedded {
                    rel: &self.rel,
                    items: &self.items,
                },
            )?;
        } else {
            state.skip_field("_embedded")?;
        }
        state.serialize_field("_links", &self.links)?;
        state.serialize_field("page", &self.page)?;
        state.end()
    }
}

/// Response body serialized as `application/hal+json`
#[derive(Debug, Clone)]
pub struct HalJson<T>(pub T);

impl<T: Serialize> IntoResponse for HalJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))],
                body,
            )
                .into_response(),
            Err(e) => Error::Serialization(e).into_response(),
        }
    }
}
