//! Member roster fetch and card binding.
//!
//! Members live in four seniority tiers fetched concurrently. The merged
//! roster always lists tiers in display order, whatever order the fetches
//! complete in, and a tier whose fetch fails contributes nothing rather than
//! sinking the whole page.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::MotionResult;
use crate::lifecycle::LifecycleBinder;
use crate::reveal::{TargetId, TriggerConfig};

/// Seniority tier of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tier4,
    Tier3,
    Tier2,
    Tier1,
}

impl Tier {
    /// Tiers in the order they appear on the page, most senior first.
    pub const DISPLAY_ORDER: [Tier; 4] = [Tier::Tier4, Tier::Tier3, Tier::Tier2, Tier::Tier1];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tier::Tier4 => "tier4",
            Tier::Tier3 => "tier3",
            Tier::Tier2 => "tier2",
            Tier::Tier1 => "tier1",
        };
        f.write_str(label)
    }
}

/// Social links attached to a member card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberLinks {
    // Older records abbreviate the field.
    #[serde(alias = "insta")]
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// One member as stored, independent of any tier ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub links: MemberLinks,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Source of member records, one listing per tier.
pub trait MemberStore: Send + Sync {
    fn list(&self, tier: Tier) -> BoxFuture<'_, MotionResult<Vec<MemberRecord>>>;
}

/// Fetch all four tiers concurrently and merge them in display order.
///
/// Completion order never affects the result. A failed tier is logged and
/// merged as empty.
pub async fn fetch_roster(store: &dyn MemberStore) -> Vec<MemberRecord> {
    let [t4, t3, t2, t1] = Tier::DISPLAY_ORDER;
    let (r4, r3, r2, r1) = futures::join!(
        store.list(t4),
        store.list(t3),
        store.list(t2),
        store.list(t1),
    );

    let mut roster = Vec::new();
    for (tier, result) in Tier::DISPLAY_ORDER.into_iter().zip([r4, r3, r2, r1]) {
        match result {
            Ok(members) => {
                log::debug!("[ROSTER] {} fetched {} members", tier, members.len());
                roster.extend(members);
            }
            Err(err) => {
                log::warn!("[ROSTER] {} fetch failed, skipping: {}", tier, err);
            }
        }
    }
    roster
}

/// Reveal target for one member's card element.
pub fn card_target(member: &MemberRecord) -> TargetId {
    TargetId::new(format!("member-{}", member.id))
}

/// Bind reveal cards for the fetched roster under the binder's scope.
///
/// Safe to call on every fetch: already-bound cards are skipped, so a
/// re-render that grows the roster only animates the new cards. Returns the
/// number of newly bound cards.
pub fn bind_member_cards(
    binder: &LifecycleBinder,
    container: TargetId,
    members: &[MemberRecord],
) -> usize {
    let targets: Vec<TargetId> = members.iter().map(card_target).collect();
    binder.rebind_group(container, &targets, TriggerConfig::card_grid())
}
