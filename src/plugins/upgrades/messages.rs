use std::sync::Arc;

use bevy::prelude::*;

use super::effect::UpgradeDef;

/// Collect an upgrade of category `E` (activate it and start its timer).
#[derive(Debug, Clone)]
pub struct CollectUpgrade<E>(pub Arc<UpgradeDef<E>>);

impl<E: Send + Sync + 'static> Message for CollectUpgrade<E> {}
