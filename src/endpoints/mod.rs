//! One client per HubSpot endpoint family.
//!
//! Each method maps one documented operation to a verb and URL template.

pub mod crm_objects;
pub mod deal_pipelines;
pub mod oauth2;

pub use crm_objects::{ChangeLogParams, CrmObjectType, CrmObjectsClient, GetAllParams};
pub use deal_pipelines::DealPipelinesClient;
pub use oauth2::OAuth2Client;
