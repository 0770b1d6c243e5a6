//! Credential pipeline for signing Azure Storage style API requests.
//!
//! This crate is the request-authentication layer of an object-storage
//! client: it turns an outgoing HTTP request into one the storage service
//! will accept by attaching credentials through an ordered chain of
//! policies. Transport, retries and response handling live outside; the
//! chain simply terminates in a caller-supplied sender.
//!
//! ## Overview
//!
//! - **[`Credential`]**: a factory that, given a successor and shared
//!   options, produces a signing policy. Variants: [`SharedKeyCredential`]
//!   (account key, HMAC-SHA256 over a canonicalized request),
//!   [`TokenCredential`] (rotatable bearer token) and
//!   [`AnonymousCredential`].
//! - **[`Policy`]**: one node of the chain; applies its transformation and
//!   forwards the request exactly once.
//! - **[`CredentialPolicy`]**: the signing node; applies a [`SignRequest`]
//!   transformation (identity by default) and forwards exactly once.
//! - **[`Pipeline`]**: assembles the chain, placing the signing policy
//!   directly before transport so retried attempts are re-signed with a
//!   fresh timestamp.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use azure_storage_auth::{Pipeline, Policy, Request, Response, Result, SharedKeyCredential};
//!
//! #[derive(Debug)]
//! struct Transport;
//!
//! #[async_trait]
//! impl Policy for Transport {
//!     async fn handle(&self, req: Request) -> Result<Response> {
//!         // Hand the signed request to your HTTP client here.
//!         let _ = req;
//!         Ok(Response::new(http::StatusCode::OK))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let credential = SharedKeyCredential::new("myacct", "bXkta2V5")?;
//! let pipeline = Pipeline::new(&credential, Arc::new(Transport));
//!
//! let req = Request::new(
//!     http::Method::GET,
//!     "https://myacct.blob.core.windows.net/mycontainer?restype=container&comp=list",
//! )?;
//! let resp = pipeline.send(req).await?;
//! println!("{}", resp.status);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod constants;

mod error;
pub use error::{Error, ErrorKind, Result};

mod request;
pub use request::{Body, Request, Response};

mod credentials;
pub use credentials::{AnonymousCredential, Credential, SharedKeyCredential, TokenCredential};

mod policies;
pub use policies::{
    AnonymousCredentialPolicy, AnonymousSigner, BearerTokenSigner, CredentialPolicy, Policy,
    PolicyFactory, PolicyOptions, RequestIdPolicy, RequestIdPolicyFactory,
    SharedKeyCredentialPolicy, SharedKeySigner, SignRequest, TokenCredentialPolicy,
};

mod pipeline;
pub use pipeline::Pipeline;
