//! Catalog and catalog item tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::klaviyo::{Document, KlaviyoClient};
use crate::domains::tools::common::{FilteredPageParams, PageParams, WebUrl, filled};
use crate::domains::tools::contract::{KlaviyoTool, ToolEntry, ToolReply};
use crate::domains::tools::error::ToolError;

const CATALOG_ITEM: &str = "catalog-item";

/// Catalog tools in registry order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetCatalogsTool>(),
        ToolEntry::of::<GetCatalogTool>(),
        ToolEntry::of::<GetCatalogItemsTool>(),
        ToolEntry::of::<GetCatalogItemTool>(),
        ToolEntry::of::<CreateCatalogItemTool>(),
        ToolEntry::of::<UpdateCatalogItemTool>(),
        ToolEntry::of::<DeleteCatalogItemTool>(),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CatalogIdParams {
    #[schemars(description = "The ID of the catalog")]
    pub catalog_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CatalogItemsParams {
    #[schemars(description = "The ID of the catalog")]
    pub catalog_id: String,

    #[serde(flatten)]
    pub listing: FilteredPageParams,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CatalogItemIdParams {
    #[schemars(description = "The ID of the catalog")]
    pub catalog_id: String,

    #[schemars(description = "The ID of the item")]
    pub item_id: String,
}

/// Optional item attributes shared by create and update.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogItemFields {
    #[schemars(description = "Description of the item")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[schemars(description = "Price of the item")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[schemars(description = "URL for the item")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<WebUrl>,

    #[schemars(description = "Image URL for the item")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<WebUrl>,

    #[schemars(description = "Custom metadata for the item")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<Map<String, Value>>,
}

impl CatalogItemFields {
    fn normalized(mut self) -> Self {
        self.description = filled(self.description);
        self
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCatalogItemParams {
    #[schemars(description = "The ID of the catalog")]
    pub catalog_id: String,

    #[schemars(description = "External ID for the item")]
    pub external_id: String,

    #[schemars(description = "Title of the item")]
    pub title: String,

    #[serde(flatten)]
    pub fields: CatalogItemFields,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCatalogItemParams {
    #[schemars(description = "The ID of the catalog")]
    pub catalog_id: String,

    #[schemars(description = "The ID of the item to update")]
    pub item_id: String,

    #[schemars(description = "Title of the item")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub fields: CatalogItemFields,
}

#[derive(Debug, Serialize)]
struct CatalogItemAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(flatten)]
    fields: CatalogItemFields,
}

pub struct GetCatalogsTool;

#[async_trait]
impl KlaviyoTool for GetCatalogsTool {
    const NAME: &'static str = "get_catalogs";
    const DESCRIPTION: &'static str = "Get a list of catalogs";
    type Params = PageParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_catalogs(&params.query()).await?.into())
    }
}

pub struct GetCatalogTool;

#[async_trait]
impl KlaviyoTool for GetCatalogTool {
    const NAME: &'static str = "get_catalog";
    const DESCRIPTION: &'static str = "Get a specific catalog by ID";
    type Params = CatalogIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client.get_catalog(&params.catalog_id).await?.into())
    }
}

pub struct GetCatalogItemsTool;

#[async_trait]
impl KlaviyoTool for GetCatalogItemsTool {
    const NAME: &'static str = "get_catalog_items";
    const DESCRIPTION: &'static str = "Get items in a catalog";
    type Params = CatalogItemsParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client
            .get_catalog_items(&params.catalog_id, &params.listing.query())
            .await?
            .into())
    }
}

pub struct GetCatalogItemTool;

#[async_trait]
impl KlaviyoTool for GetCatalogItemTool {
    const NAME: &'static str = "get_catalog_item";
    const DESCRIPTION: &'static str = "Get a specific item in a catalog";
    type Params = CatalogItemIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        Ok(client
            .get_catalog_item(&params.catalog_id, &params.item_id)
            .await?
            .into())
    }
}

pub struct CreateCatalogItemTool;

#[async_trait]
impl KlaviyoTool for CreateCatalogItemTool {
    const NAME: &'static str = "create_catalog_item";
    const DESCRIPTION: &'static str = "Create a new item in a catalog";
    type Params = CreateCatalogItemParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = CatalogItemAttributes {
            external_id: Some(params.external_id),
            title: Some(params.title),
            fields: params.fields.normalized(),
        };
        let body = Document::create(CATALOG_ITEM, attributes);
        Ok(client
            .create_catalog_item(&params.catalog_id, &body)
            .await?
            .into())
    }
}

pub struct UpdateCatalogItemTool;

#[async_trait]
impl KlaviyoTool for UpdateCatalogItemTool {
    const NAME: &'static str = "update_catalog_item";
    const DESCRIPTION: &'static str = "Update an existing item in a catalog";
    type Params = UpdateCatalogItemParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        let attributes = CatalogItemAttributes {
            external_id: None,
            title: filled(params.title),
            fields: params.fields.normalized(),
        };
        let body = Document::update(CATALOG_ITEM, params.item_id.as_str(), attributes);
        Ok(client
            .update_catalog_item(&params.catalog_id, &params.item_id, &body)
            .await?
            .into())
    }
}

pub struct DeleteCatalogItemTool;

#[async_trait]
impl KlaviyoTool for DeleteCatalogItemTool {
    const NAME: &'static str = "delete_catalog_item";
    const DESCRIPTION: &'static str = "Delete an item from a catalog";
    type Params = CatalogItemIdParams;

    async fn run(client: &KlaviyoClient, params: Self::Params) -> Result<ToolReply, ToolError> {
        client
            .delete_catalog_item(&params.catalog_id, &params.item_id)
            .await?;
        Ok(ToolReply::message(format!(
            "Catalog item {} successfully deleted from catalog {}",
            params.item_id, params.catalog_id
        )))
    }
}
