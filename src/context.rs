//! Application Context
//!
//! Store plus backend, shared via Leptos Context API. User actions that
//! touch the backend live here so components stay thin.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::backend::{Backend, MenuBackend};
use crate::controller::{OptimisticWrite, PendingWrite};
use crate::editor::{persist, SubmitBlocked, SubmitDone};
use crate::error::AppError;
use crate::store::{store_dismiss_toast, store_show_toast, AppStateStoreFields, AppStore, ToastKind};

/// How long a toast stays up
const TOAST_MS: u32 = 4000;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    backend: StoredValue<Backend>,
}

impl AppContext {
    pub fn new(store: AppStore, backend: Backend) -> Self {
        Self {
            store,
            backend: StoredValue::new(backend),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend.get_value()
    }

    // ========================
    // Feedback
    // ========================

    /// Log an error and toast it unless it is a silent one
    pub fn report(&self, err: AppError) {
        match &err {
            AppError::Validation(v) => {
                web_sys::console::log_1(&format!("[App] Invalid {}: {}", v.field(), v).into())
            }
            _ => web_sys::console::log_1(&format!("[App] {:?}", err).into()),
        }
        if err.is_user_visible() {
            self.toast(ToastKind::Error, err.to_string());
        }
    }

    pub fn toast(&self, kind: ToastKind, message: String) {
        let store = self.store;
        let id = store_show_toast(&store, kind, message);
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            store_dismiss_toast(&store, id);
        });
    }

    // ========================
    // Modal
    // ========================

    pub fn open_create(&self) {
        self.store.menu().write().open_create();
    }

    pub fn open_edit(&self, id: &str) {
        let result = self.store.menu().write().open_edit(id);
        if let Err(e) = result {
            self.report(e);
        }
    }

    pub fn close_modal(&self) {
        self.store.menu().write().close_modal();
    }

    /// Validate the draft and persist it; the modal closes on success
    pub fn submit(&self) {
        let plan = self.store.editor().write().begin_submit();
        let plan = match plan {
            Ok(plan) => plan,
            Err(SubmitBlocked::InFlight) => return,
            Err(SubmitBlocked::Invalid(e)) => {
                self.report(e.into());
                return;
            }
        };

        let ctx = *self;
        let backend = self.backend();
        let key = plan.key.clone();
        spawn_local(async move {
            let result = persist(&backend, plan).await;
            let done = ctx.store.editor().write().finish_submit(key.as_ref(), &result);
            if let SubmitDone::Saved {
                released_preview: Some(url),
            } = &done
            {
                let _ = web_sys::Url::revoke_object_url(url);
            }
            match result {
                Ok(item) => {
                    web_sys::console::log_1(&format!("[App] Saved food {}", item.id).into());
                    // Only the session that was submitted closes
                    if let (SubmitDone::Saved { .. }, Some(key)) = (&done, &key) {
                        ctx.store.menu().write().close_session(key);
                    }
                    ctx.toast(ToastKind::Success, "Prato salvo".to_string());
                }
                Err(e) => ctx.report(e),
            }
        });
    }

    // ========================
    // List actions
    // ========================

    pub fn toggle_availability(&self, id: &str) {
        let write = self.store.menu().write().toggle_availability(id);
        match write {
            Ok(write) => self.send(write),
            Err(e) => self.report(e),
        }
    }

    pub fn request_delete(&self, id: &str) {
        let result = self.store.menu().write().request_delete(id);
        if let Err(e) = result {
            self.report(e);
        }
    }

    pub fn confirm_delete(&self) {
        let write = self.store.menu().write().confirm_delete();
        match write {
            Some(Ok(write)) => self.send(write),
            Some(Err(e)) => self.report(e),
            None => {}
        }
    }

    pub fn cancel_delete(&self) {
        self.store.menu().write().cancel_delete();
    }

    /// Push an optimistic write to the backend, rolling back on failure
    fn send(&self, write: OptimisticWrite) {
        let ctx = *self;
        let backend = self.backend();
        spawn_local(async move {
            let result = match write.write {
                PendingWrite::Availability(available) => {
                    backend.set_availability(&write.id, available).await
                }
                PendingWrite::Delete => backend.delete(&write.id).await,
            };
            match result {
                Ok(()) => ctx.store.menu().write().write_acked(&write),
                Err(e) => {
                    ctx.store.menu().write().write_failed(&write);
                    ctx.report(e);
                }
            }
        });
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
