use anyhow::Result;

use crate::progress::entities::PeerSummary;

/// Anything able to provide the list of friends shown next to the local user.
#[cfg_attr(test, mockall::automock)]
pub trait PeerSource {
    fn peers(&self) -> Result<Vec<PeerSummary>>;
}

/// Hardcoded friend list. There is no sync yet, so these never change.
pub struct StaticPeers;

impl PeerSource for StaticPeers {
    fn peers(&self) -> Result<Vec<PeerSummary>> {
        Ok(vec![
            PeerSummary::new(
                "Ara Zobayan",
                8500,
                "https://api.dicebear.com/7.x/avataaars/png?seed=Zobayan",
            ),
            PeerSummary::new(
                "Sister Yu",
                3400,
                "https://api.dicebear.com/7.x/avataaars/png?seed=Yujie",
            ),
            PeerSummary::new(
                "Ema Sakuraba",
                0,
                "https://api.dicebear.com/7.x/avataaars/png?seed=Emma",
            ),
            PeerSummary::new(
                "LeBron James",
                15000,
                "https://api.dicebear.com/7.x/avataaars/png?seed=LeBron",
            ),
        ])
    }
}
