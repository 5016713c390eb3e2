use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::error::{EditorError, EditorResult};
use crate::raster::RasterRef;
use crate::session::EditorSession;

/// A session shared between threads or tasks.
///
/// Destructive operations (crop, resize) are serialized through a separate
/// gate so at most one is in flight per session: the plain variants wait
/// their turn, the `try_` variants fail with `ConcurrentOperation`.
/// Everything else locks the session only for the duration of the call.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Inner>,
}

struct Inner {
    session: Mutex<EditorSession>,
    destructive: Mutex<()>,
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSession")
            .field("busy", &self.is_busy())
            .finish()
    }
}

impl SharedSession {
    pub fn new(session: EditorSession) -> Self {
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                destructive: Mutex::new(()),
            }),
        }
    }

    /// Waits until no other destructive operation is in flight
    pub fn reserve(&self) -> Reservation<'_> {
        Reservation {
            shared: self,
            _slot: self.inner.destructive.lock(),
        }
    }

    /// Claims the destructive slot, or fails if it is taken
    pub fn try_reserve(&self) -> EditorResult<Reservation<'_>> {
        match self.inner.destructive.try_lock() {
            Some(slot) => Ok(Reservation { shared: self, _slot: slot }),
            None => {
                log::warn!("Rejected destructive operation: another one is in flight");
                Err(EditorError::ConcurrentOperation)
            }
        }
    }

    /// Returns true while a destructive operation holds the slot
    pub fn is_busy(&self) -> bool {
        self.inner.destructive.is_locked()
    }

    pub fn crop(&self) -> EditorResult<RasterRef> {
        self.reserve().commit_crop()
    }

    pub fn try_crop(&self) -> EditorResult<RasterRef> {
        self.try_reserve()?.commit_crop()
    }

    pub fn resize(&self, width: u32, height: u32) -> EditorResult<RasterRef> {
        self.reserve().apply_resize(width, height)
    }

    pub fn try_resize(&self, width: u32, height: u32) -> EditorResult<RasterRef> {
        self.try_reserve()?.apply_resize(width, height)
    }

    /// Runs `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        let mut session = self.inner.session.lock();
        f(&mut *session)
    }

    pub fn lock(&self) -> MutexGuard<'_, EditorSession> {
        self.inner.session.lock()
    }
}

/// Exclusive right to run destructive operations until dropped
pub struct Reservation<'a> {
    shared: &'a SharedSession,
    _slot: MutexGuard<'a, ()>,
}

impl Reservation<'_> {
    pub fn commit_crop(&self) -> EditorResult<RasterRef> {
        self.shared.with(|session| session.commit_crop())
    }

    pub fn apply_resize(&self, width: u32, height: u32) -> EditorResult<RasterRef> {
        self.shared.with(|session| session.apply_resize(width, height))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        self.shared.with(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::raster::Raster;
    use egui::Color32;

    fn shared(width: u32, height: u32) -> SharedSession {
        let raster = Raster::from_color(width, height, Color32::WHITE);
        SharedSession::new(EditorSession::with_raster(&true, raster, EditorConfig::default()).unwrap())
    }

    #[test]
    fn test_try_reserve_rejects_while_reserved() {
        let shared = shared(16, 16);
        let reservation = shared.reserve();
        assert!(shared.is_busy());
        assert!(matches!(shared.try_resize(8, 8), Err(EditorError::ConcurrentOperation)));

        reservation.apply_resize(8, 8).unwrap();
        drop(reservation);
        assert!(!shared.is_busy());
        assert_eq!(shared.try_resize(4, 4).unwrap().dimensions(), (4, 4));
        assert_eq!(shared.lock().history().len(), 3);
    }

    #[test]
    fn test_non_destructive_calls_bypass_the_slot() {
        let shared = shared(16, 16);
        let _reservation = shared.reserve();
        shared.with(|session| session.toggle_text_mode());
        assert!(shared.lock().mode().is_text_placing());
    }
}
