use async_trait::async_trait;
use uuid::Uuid;

use crate::traits::Notifiable;
use crate::types::{Coordinate, LocationPolicy, PermissionStatus, SourceError};

/// Push based data source. Values are delivered asynchronously to every subscribed
/// listener at a rate controlled by the source.
pub trait PushSource<T>: Send + Sync {
    /// Options applied when subscribing (update interval, location policy...)
    type Options;

    /// Registers a listener that receives every pushed value.
    /// Returns the id used to unsubscribe.
    fn subscribe(
        &self,
        options: &Self::Options,
        listener: &mut dyn Notifiable<T>,
    ) -> Result<Uuid, SourceError>;

    /// Removes a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: Uuid);
}

/// Geolocation source. Reading a position requires the user to grant access first.
#[async_trait]
pub trait LocationSource: PushSource<Coordinate, Options = LocationPolicy> {
    async fn request_permission(&self) -> PermissionStatus;
}
