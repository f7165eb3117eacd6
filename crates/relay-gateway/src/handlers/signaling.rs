//! Call-signaling handlers (offer, reject, accept)
//!
//! Pure forwarding per event; no call state is tracked centrally. The
//! two endpoints exchanging these events own whatever state a call has.

use crate::protocol::{CallAccept, CallKind, CallReject, IncomingCall, OutgoingCall, ServerEvent};
use crate::server::GatewayState;

/// Handles call-control relay events
pub struct SignalingHandler;

impl SignalingHandler {
    /// Handle an outgoing call offer
    ///
    /// Rings the callee when reachable; otherwise tells the caller the
    /// target is offline. If the caller is unreachable too the event is
    /// dropped, which only happens when the caller raced its own
    /// disconnect.
    pub async fn outgoing_call(state: &GatewayState, kind: CallKind, call: OutgoingCall) {
        let OutgoingCall {
            from,
            to,
            room_id,
            call_type,
        } = call;

        if let Some(target) = state.registry().resolve(&to) {
            tracing::debug!(
                call = %kind,
                from = %from,
                to = %to,
                room_id = %room_id,
                "Relaying call offer"
            );

            let ringing = kind.incoming(IncomingCall {
                from,
                room_id,
                call_type,
            });
            if target.send(ringing).await.is_err() {
                tracing::debug!(to = %to, "Call offer dropped (target connection gone)");
            }
        } else if let Some(caller) = state.registry().resolve(&from) {
            tracing::debug!(call = %kind, from = %from, to = %to, "Call target offline");
            let _ = caller.send(kind.offline()).await;
        } else {
            tracing::debug!(call = %kind, from = %from, to = %to, "Call offer dropped");
        }
    }

    /// Handle a call rejection; notifies the caller if still reachable
    pub async fn reject_call(state: &GatewayState, kind: CallKind, reject: CallReject) {
        match state.registry().resolve(&reject.from) {
            Some(caller) => {
                tracing::debug!(call = %kind, from = %reject.from, "Relaying call rejection");
                let _ = caller.send(kind.rejected()).await;
            }
            None => {
                tracing::debug!(call = %kind, from = %reject.from, "Call rejection dropped");
            }
        }
    }

    /// Handle a call acceptance; notifies the counterpart if still reachable
    pub async fn accept_call(state: &GatewayState, accept: CallAccept) {
        match state.registry().resolve(&accept.id) {
            Some(counterpart) => {
                tracing::debug!(id = %accept.id, "Relaying call acceptance");
                let _ = counterpart.send(ServerEvent::AcceptCall).await;
            }
            None => {
                tracing::debug!(id = %accept.id, "Call acceptance dropped");
            }
        }
    }
}
