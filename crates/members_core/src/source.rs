use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{domain::PeerId, participant::RenderedParticipant};
use tokio::sync::{watch, Mutex};
use tracing::info;

/// Opaque pagination cursor returned by [`MemberSource::fetch_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreHandle(pub u64);

/// Live subscription to full participant snapshots. `None` means the list is
/// not known yet.
pub struct MemberSubscription {
    pub snapshots: watch::Receiver<Option<Vec<RenderedParticipant>>>,
    pub load_more: Option<LoadMoreHandle>,
}

#[async_trait]
pub trait MemberSource: Send + Sync {
    async fn fetch_page(&self, channel_id: PeerId) -> Result<MemberSubscription>;
    async fn load_more(&self, channel_id: PeerId, handle: &LoadMoreHandle) -> Result<()>;
}

struct InMemoryChannel {
    channel_id: PeerId,
    all: Vec<RenderedParticipant>,
    visible: usize,
    tx: watch::Sender<Option<Vec<RenderedParticipant>>>,
}

impl InMemoryChannel {
    fn publish(&self) {
        let page = self.all.iter().take(self.visible).cloned().collect();
        self.tx.send_replace(Some(page));
    }
}

/// Member source over a fixed participant list, paged `page_size` at a time.
pub struct InMemoryMemberSource {
    page_size: usize,
    channel: Mutex<Option<InMemoryChannel>>,
    initial: Mutex<Vec<RenderedParticipant>>,
}

impl InMemoryMemberSource {
    pub fn new(participants: Vec<RenderedParticipant>, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            channel: Mutex::new(None),
            initial: Mutex::new(participants),
        }
    }

    /// Replaces the server-side list and pushes a fresh snapshot.
    pub async fn replace(&self, participants: Vec<RenderedParticipant>) {
        let mut guard = self.channel.lock().await;
        match guard.as_mut() {
            Some(channel) => {
                channel.all = participants;
                channel.publish();
            }
            None => *self.initial.lock().await = participants,
        }
    }
}

#[async_trait]
impl MemberSource for InMemoryMemberSource {
    async fn fetch_page(&self, channel_id: PeerId) -> Result<MemberSubscription> {
        let all = std::mem::take(&mut *self.initial.lock().await);
        let (tx, snapshots) = watch::channel(None);
        let channel = InMemoryChannel {
            channel_id,
            visible: self.page_size.min(all.len()),
            all,
            tx,
        };
        channel.publish();
        let load_more = (channel.visible < channel.all.len()).then_some(LoadMoreHandle(0));
        *self.channel.lock().await = Some(channel);
        Ok(MemberSubscription {
            snapshots,
            load_more,
        })
    }

    async fn load_more(&self, channel_id: PeerId, handle: &LoadMoreHandle) -> Result<()> {
        let mut guard = self.channel.lock().await;
        let channel = guard
            .as_mut()
            .filter(|channel| channel.channel_id == channel_id)
            .ok_or_else(|| anyhow!("no member subscription for channel {channel_id}"))?;
        let before = channel.visible;
        channel.visible = (channel.visible + self.page_size).min(channel.all.len());
        if channel.visible != before {
            info!(
                channel_id = channel_id.0,
                cursor = handle.0,
                visible = channel.visible,
                "loaded more members"
            );
            channel.publish();
        }
        Ok(())
    }
}
