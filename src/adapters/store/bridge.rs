//! Store gateway backed by the embedding host shell.
//!
//! The core runs embedded in a mobile shell; only the host can talk to the
//! device's native purchase SDK. Each gateway call is forwarded as a
//! [`StoreCommand`] over an mpsc channel and awaits a oneshot reply from the
//! host. Channel closure and reply timeouts surface as [`StoreError`]s,
//! never as a hang or a panic in the core.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::config::StoreConfig;
use crate::domain::catalog::StoreProductId;
use crate::domain::foundation::UserId;
use crate::ports::{
    EntitlementSet, PurchaseResult, StoreError, StoreOffering, StorePurchaseGateway,
};

/// A store request forwarded to the host shell.
///
/// The host consumes these from the receiving end of the command channel,
/// drives its native purchase SDK, and answers on the enclosed reply sender.
#[derive(Debug)]
pub enum StoreCommand {
    Identify {
        user_id: UserId,
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
    ListOfferings {
        reply: oneshot::Sender<Result<Vec<StoreOffering>, StoreError>>,
    },
    Purchase {
        product_id: StoreProductId,
        reply: oneshot::Sender<Result<PurchaseResult, StoreError>>,
    },
    Restore {
        reply: oneshot::Sender<Result<EntitlementSet, StoreError>>,
    },
    LogOut {
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
}

/// [`StorePurchaseGateway`] that delegates every call to the host shell.
pub struct HostBridgeStoreGateway {
    commands: mpsc::Sender<StoreCommand>,
    call_timeout: Duration,
}

impl HostBridgeStoreGateway {
    pub fn new(commands: mpsc::Sender<StoreCommand>, config: &StoreConfig) -> Self {
        Self {
            commands,
            call_timeout: Duration::from_secs(config.call_timeout_secs),
        }
    }

    /// Builds the gateway together with the receiver the host shell drains.
    pub fn channel(capacity: usize, config: &StoreConfig) -> (Self, mpsc::Receiver<StoreCommand>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx, config), rx)
    }

    async fn send(&self, command: StoreCommand) -> Result<(), StoreError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| StoreError::bridge_closed("Host command channel is closed"))
    }

    /// Awaits a host reply, bounded by the configured call timeout.
    async fn await_reply<T>(
        &self,
        reply: oneshot::Receiver<Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.call_timeout, reply).await {
            Err(_) => Err(StoreError::timeout(format!(
                "Host did not reply within {}s",
                self.call_timeout.as_secs()
            ))),
            Ok(Err(_)) => Err(StoreError::bridge_closed("Host dropped the reply channel")),
            Ok(Ok(result)) => result,
        }
    }

    /// Awaits a host reply with no deadline. The purchase sheet is owned by
    /// the device store and can legitimately stay open for minutes.
    async fn await_reply_unbounded<T>(
        &self,
        reply: oneshot::Receiver<Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match reply.await {
            Err(_) => Err(StoreError::bridge_closed("Host dropped the reply channel")),
            Ok(result) => result,
        }
    }
}

#[async_trait]
impl StorePurchaseGateway for HostBridgeStoreGateway {
    async fn identify(&self, user_id: &UserId) -> Result<(), StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreCommand::Identify {
            user_id: user_id.clone(),
            reply: tx,
        })
        .await?;
        self.await_reply(rx).await
    }

    async fn list_offerings(&self) -> Result<Vec<StoreOffering>, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreCommand::ListOfferings { reply: tx }).await?;
        self.await_reply(rx).await
    }

    async fn purchase(&self, product_id: &StoreProductId) -> Result<PurchaseResult, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreCommand::Purchase {
            product_id: product_id.clone(),
            reply: tx,
        })
        .await?;
        self.await_reply_unbounded(rx).await
    }

    async fn restore(&self) -> Result<EntitlementSet, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreCommand::Restore { reply: tx }).await?;
        self.await_reply(rx).await
    }

    async fn log_out(&self) -> Result<(), StoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(StoreCommand::LogOut { reply: tx }).await?;
        self.await_reply(rx).await
    }
}
