//! Executor for `WindowOnBeforeUnload` records.
//!
//! Installs a native listener on the host window, or clears it for a removal
//! record. When the navigation confirmation point fires, the listener posts
//! `ExecOnBeforeUnload` back to the isolated context and, for `Prevent`,
//! suppresses navigation on the spot. The decision comes from the transported
//! flag; the isolated callback runs later and cannot influence it.

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use xfer::MessageType;
use xfer::MutationType;
use xfer::NavigationPolicy;
use xfer::OnBeforeUnloadIndex;
use xfer::OnBeforeUnloadRecord;
use xfer::StringTable;

use crate::backchannel::Backchannel;
use crate::executor::CommandExecutor;
use crate::executor::Descriptor;
use crate::executor::ExecutorContext;
use crate::executor::Field;
use crate::host::BeforeUnloadEvent;
use crate::host::HostWindow;
use crate::host::NativeListener;

pub struct OnBeforeUnloadExecutor {
    window: Arc<dyn HostWindow>,
    backchannel: Backchannel,
    allowed_execution: bool,
}

impl OnBeforeUnloadExecutor {
    pub fn new(ctx: &ExecutorContext) -> Self {
        Self {
            window: Arc::clone(&ctx.window),
            backchannel: ctx.backchannel.clone(),
            allowed_execution: ctx.config.allows(MutationType::WindowOnBeforeUnload),
        }
    }

    fn listener(&self, policy: NavigationPolicy) -> NativeListener {
        let backchannel = self.backchannel.clone();
        Arc::new(move |event: &mut BeforeUnloadEvent| {
            if let Err(e) = backchannel.post(MessageType::ExecOnBeforeUnload) {
                warn!(error = %e, "before-unload notification dropped");
            }
            if policy.prevents() {
                event.prevent_default();
                event.request_confirmation();
            }
        })
    }
}

impl CommandExecutor for OnBeforeUnloadExecutor {
    fn record_len(&self) -> usize {
        OnBeforeUnloadIndex::END
    }

    fn execute(
        &self,
        words: &[u16],
        start: usize,
        _strings: &StringTable,
        allowed: bool,
    ) -> xfer::Result<usize> {
        let record = OnBeforeUnloadRecord::decode(words, start)?;
        if !(self.allowed_execution && allowed) {
            return Ok(start + OnBeforeUnloadIndex::END);
        }
        match record {
            OnBeforeUnloadRecord::Install(policy) => {
                debug!(?policy, "installing before-unload listener");
                self.window.set_on_before_unload(Some(self.listener(policy)));
            }
            OnBeforeUnloadRecord::Remove => {
                debug!("removing before-unload listener");
                self.window.set_on_before_unload(None);
            }
        }
        Ok(start + OnBeforeUnloadIndex::END)
    }

    fn print(&self, words: &[u16], start: usize, _strings: &StringTable) -> xfer::Result<Descriptor> {
        let desc = Descriptor::new(MutationType::WindowOnBeforeUnload.name(), self.allowed_execution);
        Ok(match OnBeforeUnloadRecord::decode(words, start)? {
            OnBeforeUnloadRecord::Install(policy) => desc.field("policy", Field::Policy(policy)),
            OnBeforeUnloadRecord::Remove => desc.field("remove", Field::Flag(true)),
        })
    }
}
