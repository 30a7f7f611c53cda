//! GraphQL schema: object types, inputs, and the query/mutation roots
//!
//! The GraphQL types mirror the core domain types rather than exposing them
//! directly, so the transport shape can evolve without touching the core.
//! Resolvers decode inputs, call `ReceiverService`, and convert results; the
//! pagination engine runs here, on the service's repository-ordered list.

use async_graphql::{
    Context, EmptySubscription, Enum, ErrorExtensions, ID, InputObject, Object, Schema,
    SimpleObject,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{ReceiverError, ValidationError};
use crate::core::pagination;
use crate::core::update;
use crate::service::{CreateReceiverInput, ReceiverService};
use crate::storage::ReceiverFilter;

/// The executable schema for the receiver API.
pub type ReceiversSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the service injected as context data.
pub fn build_schema(service: Arc<ReceiverService>) -> ReceiversSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

// ---------------------------------------------------------------------------
// Enums (wire tokens)
// ---------------------------------------------------------------------------

/// Receiver lifecycle status.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Draft,
    Validated,
}

impl From<crate::core::receiver::Status> for Status {
    fn from(status: crate::core::receiver::Status) -> Self {
        match status {
            crate::core::receiver::Status::Draft => Status::Draft,
            crate::core::receiver::Status::Validated => Status::Validated,
        }
    }
}

impl From<Status> for crate::core::receiver::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => crate::core::receiver::Status::Draft,
            Status::Validated => crate::core::receiver::Status::Validated,
        }
    }
}

/// Pix key type, exposed with the Brazilian wire tokens.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixKeyType {
    #[graphql(name = "CPF")]
    Cpf,
    #[graphql(name = "CNPJ")]
    Cnpj,
    #[graphql(name = "EMAIL")]
    Email,
    #[graphql(name = "TELEFONE")]
    Phone,
    #[graphql(name = "CHAVE_ALEATORIA")]
    RandomKey,
}

impl From<crate::core::pix::PixKeyType> for PixKeyType {
    fn from(key_type: crate::core::pix::PixKeyType) -> Self {
        match key_type {
            crate::core::pix::PixKeyType::Cpf => PixKeyType::Cpf,
            crate::core::pix::PixKeyType::Cnpj => PixKeyType::Cnpj,
            crate::core::pix::PixKeyType::Email => PixKeyType::Email,
            crate::core::pix::PixKeyType::Phone => PixKeyType::Phone,
            crate::core::pix::PixKeyType::RandomKey => PixKeyType::RandomKey,
        }
    }
}

impl From<PixKeyType> for crate::core::pix::PixKeyType {
    fn from(key_type: PixKeyType) -> Self {
        match key_type {
            PixKeyType::Cpf => crate::core::pix::PixKeyType::Cpf,
            PixKeyType::Cnpj => crate::core::pix::PixKeyType::Cnpj,
            PixKeyType::Email => crate::core::pix::PixKeyType::Email,
            PixKeyType::Phone => crate::core::pix::PixKeyType::Phone,
            PixKeyType::RandomKey => crate::core::pix::PixKeyType::RandomKey,
        }
    }
}

// ---------------------------------------------------------------------------
// Object types
// ---------------------------------------------------------------------------

#[derive(SimpleObject, Debug, Clone)]
pub struct Pix {
    pub key_type: PixKeyType,
    pub key: String,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct Receiver {
    pub id: ID,
    pub identifier: String,
    pub name: String,
    pub email: String,
    pub pix: Pix,
    pub bank: Option<String>,
    pub agency: Option<String>,
    pub account: Option<String>,
    pub status: Status,
}

impl From<crate::core::receiver::Receiver> for Receiver {
    fn from(receiver: crate::core::receiver::Receiver) -> Self {
        Self {
            id: ID(receiver.id.to_string()),
            identifier: receiver.identifier,
            name: receiver.name,
            email: receiver.email,
            pix: Pix {
                key_type: receiver.pix.key_type.into(),
                key: receiver.pix.key,
            },
            bank: receiver.bank,
            agency: receiver.agency,
            account: receiver.account,
            status: receiver.status.into(),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct Edge {
    pub cursor: String,
    pub node: Receiver,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: Option<bool>,
}

/// One page of receivers.
#[derive(SimpleObject, Debug, Clone)]
pub struct Receivers {
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
}

impl From<pagination::Connection> for Receivers {
    fn from(connection: pagination::Connection) -> Self {
        Self {
            edges: connection
                .edges
                .into_iter()
                .map(|edge| Edge {
                    cursor: edge.cursor,
                    node: edge.node.into(),
                })
                .collect(),
            page_info: PageInfo {
                start_cursor: connection.page_info.start_cursor,
                end_cursor: connection.page_info.end_cursor,
                has_next_page: connection.page_info.has_next_page,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(InputObject, Debug)]
pub struct NewReceiver {
    pub identifier: String,
    pub name: String,
    pub email: String,
    pub pix_key_type: String,
    pub pix_key: String,
    pub bank: Option<String>,
    pub agency: Option<String>,
    pub account: Option<String>,
}

#[derive(InputObject, Debug)]
pub struct UpdateReceiver {
    pub id: ID,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub pix_key_type: Option<String>,
    pub pix_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Roots
// ---------------------------------------------------------------------------

fn parse_id(id: &ID) -> Result<Uuid, async_graphql::Error> {
    Uuid::parse_str(id.as_str()).map_err(|_| {
        ReceiverError::from(ValidationError::InvalidId {
            value: id.to_string(),
        })
        .extend()
    })
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<ReceiverService>> {
    ctx.data::<Arc<ReceiverService>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch a single receiver by id.
    async fn receiver(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Receiver> {
        let service = service(ctx)?;
        let id = parse_id(&id)?;

        let receiver = service.find_by_id(&id).await.map_err(|e| e.extend())?;
        Ok(receiver.into())
    }

    /// List receivers with cursor pagination and optional exact-match
    /// filters.
    #[allow(clippy::too_many_arguments)]
    async fn list_receivers(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        status: Option<Status>,
        name: Option<String>,
        key_type: Option<PixKeyType>,
        key: Option<String>,
    ) -> async_graphql::Result<Receivers> {
        let service = service(ctx)?;
        let filter = ReceiverFilter {
            status: status.map(Into::into),
            name,
            key_type: key_type.map(Into::into),
            key,
        };

        let records = service.list(&filter).await.map_err(|e| e.extend())?;
        let connection =
            pagination::paginate(records, first, after.as_deref()).map_err(|e| e.extend())?;

        Ok(connection.into())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a receiver. The new record starts in `DRAFT` status.
    async fn create_receiver(
        &self,
        ctx: &Context<'_>,
        input: NewReceiver,
    ) -> async_graphql::Result<Receiver> {
        let service = service(ctx)?;

        let receiver = service
            .create(CreateReceiverInput {
                identifier: input.identifier,
                name: input.name,
                email: input.email,
                pix_key_type: input.pix_key_type,
                pix_key: input.pix_key,
                bank: input.bank,
                agency: input.agency,
                account: input.account,
            })
            .await
            .map_err(|e| e.extend())?;

        Ok(receiver.into())
    }

    /// Update a receiver under the status-gated field policy.
    async fn update_receiver(
        &self,
        ctx: &Context<'_>,
        input: UpdateReceiver,
    ) -> async_graphql::Result<String> {
        let service = service(ctx)?;
        let id = parse_id(&input.id)?;

        service
            .update(update::UpdateReceiverInput {
                id,
                identifier: input.identifier,
                name: input.name,
                email: input.email,
                pix_key_type: input.pix_key_type,
                pix_key: input.pix_key,
            })
            .await
            .map_err(|e| e.extend())?;

        Ok(format!("Updated {} successfully", input.id.as_str()))
    }

    /// Soft-delete one or more receivers.
    async fn delete_receivers(
        &self,
        ctx: &Context<'_>,
        ids: Vec<ID>,
    ) -> async_graphql::Result<String> {
        let service = service(ctx)?;

        let parsed: Vec<Uuid> = ids
            .iter()
            .map(parse_id)
            .collect::<Result<_, _>>()?;

        service.delete(&parsed).await.map_err(|e| e.extend())?;

        let joined: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        Ok(format!("Deleted [{}] successfully", joined.join(", ")))
    }
}
