//! View navigation for the status admin screen.
//!
//! `Navigator` owns the registry and the active view. Front ends only call the
//! action methods below; every transition between views happens here.

use crate::banner::{Banner, BannerKind};
use crate::error::{NavigatorError, RegistryError};
use crate::model::{StatusCode, StatusRecord};
use crate::registry::StatusRegistry;
use std::time::{Duration, Instant};

/// Input buffer of a form plus the error left by the last failed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub input: String,
    pub error: Option<String>,
}

impl FormState {
    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        f(&mut self.input);
        self.error = None;
    }

    fn reject(&mut self, message: String) {
        self.input.clear();
        self.error = Some(message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    AddForm(FormState),
    EditForm {
        target: StatusRecord,
        form: FormState,
    },
    ConfirmRetire {
        target: StatusRecord,
        error: Option<String>,
    },
    AddSuccess {
        created: StatusRecord,
    },
    EditSuccess {
        renamed: StatusRecord,
    },
    RetireSuccess {
        retired: StatusRecord,
    },
    RetireCancelled,
}

/// Payload-free tag of a [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    AddForm,
    EditForm,
    ConfirmRetire,
    AddSuccess,
    EditSuccess,
    RetireSuccess,
    RetireCancelled,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::List => ViewKind::List,
            View::AddForm(_) => ViewKind::AddForm,
            View::EditForm { .. } => ViewKind::EditForm,
            View::ConfirmRetire { .. } => ViewKind::ConfirmRetire,
            View::AddSuccess { .. } => ViewKind::AddSuccess,
            View::EditSuccess { .. } => ViewKind::EditSuccess,
            View::RetireSuccess { .. } => ViewKind::RetireSuccess,
            View::RetireCancelled => ViewKind::RetireCancelled,
        }
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            View::AddForm(form) | View::EditForm { form, .. } => Some(form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            View::AddForm(form) | View::EditForm { form, .. } => Some(form),
            _ => None,
        }
    }
}

pub struct Navigator {
    registry: StatusRegistry,
    view: View,
    banner: Option<Banner>,
    banner_ttl: Duration,
}

impl Navigator {
    pub fn new(registry: StatusRegistry, banner_ttl: Duration) -> Self {
        Self {
            registry,
            view: View::List,
            banner: None,
            banner_ttl,
        }
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    fn go(&mut self, next: View) {
        tracing::debug!(from = ?self.view.kind(), to = ?next.kind(), "view transition");
        self.view = next;
    }

    fn not_available(&self, action: &'static str) -> NavigatorError {
        NavigatorError::NotAvailable {
            view: self.view.kind(),
            action,
        }
    }

    fn raise(&mut self, kind: BannerKind, message: String) {
        self.banner = Some(Banner::new(kind, message, Instant::now(), self.banner_ttl));
    }

    /// Show a banner that is not tied to a transition.
    pub fn notify(&mut self, kind: BannerKind, message: impl Into<String>) {
        self.raise(kind, message.into());
    }

    /// Drop the banner once its time is up, whatever view is active.
    pub fn expire_banner(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.banner = None;
        }
    }

    /// Look up a record that can still be edited or retired.
    fn active_record(&self, code: &StatusCode) -> Result<StatusRecord, NavigatorError> {
        let record = self
            .registry
            .get(code)
            .ok_or_else(|| RegistryError::UnknownCode(code.clone()))?;
        if !record.is_active() {
            return Err(RegistryError::AlreadyRetired(code.clone()).into());
        }
        Ok(record.clone())
    }

    pub fn start_add(&mut self) -> Result<(), NavigatorError> {
        if self.view != View::List {
            return Err(self.not_available("start add"));
        }
        self.go(View::AddForm(FormState::default()));
        Ok(())
    }

    pub fn start_edit(&mut self, code: &StatusCode) -> Result<(), NavigatorError> {
        if self.view != View::List {
            return Err(self.not_available("start edit"));
        }
        let target = self.active_record(code)?;
        self.go(View::EditForm {
            target,
            form: FormState::default(),
        });
        Ok(())
    }

    pub fn start_retire(&mut self, code: &StatusCode) -> Result<(), NavigatorError> {
        if self.view != View::List {
            return Err(self.not_available("start retire"));
        }
        let target = self.active_record(code)?;
        self.go(View::ConfirmRetire {
            target,
            error: None,
        });
        Ok(())
    }

    pub fn set_input(&mut self, value: &str) -> Result<(), NavigatorError> {
        self.edit_input("set input", |s| {
            s.clear();
            s.push_str(value);
        })
    }

    pub fn push_char(&mut self, c: char) -> Result<(), NavigatorError> {
        self.edit_input("type", |s| s.push(c))
    }

    pub fn pop_char(&mut self) -> Result<(), NavigatorError> {
        self.edit_input("delete", |s| {
            s.pop();
        })
    }

    fn edit_input(
        &mut self,
        action: &'static str,
        f: impl FnOnce(&mut String),
    ) -> Result<(), NavigatorError> {
        match self.view.form_mut() {
            Some(form) => {
                form.edit(f);
                Ok(())
            }
            None => Err(self.not_available(action)),
        }
    }

    /// Submit the active form. Validation failures stay on the form as a field error.
    pub fn submit(&mut self) -> Result<(), NavigatorError> {
        match std::mem::replace(&mut self.view, View::List) {
            View::AddForm(mut form) => {
                match self.registry.add(form.input.trim()) {
                    Ok(created) => {
                        self.raise(
                            BannerKind::Success,
                            format!("Status {} \"{}\" created", created.code, created.name),
                        );
                        self.view = View::AddForm(form);
                        self.go(View::AddSuccess { created });
                    }
                    Err(e) => {
                        form.reject(e.user_message());
                        self.view = View::AddForm(form);
                    }
                }
                Ok(())
            }
            View::EditForm { target, mut form } => {
                match self.registry.rename(&target.code, form.input.trim()) {
                    Ok(renamed) => {
                        self.raise(
                            BannerKind::Success,
                            format!("Status {} renamed to \"{}\"", renamed.code, renamed.name),
                        );
                        self.view = View::EditForm { target, form };
                        self.go(View::EditSuccess { renamed });
                    }
                    Err(e) => {
                        form.reject(e.user_message());
                        self.view = View::EditForm { target, form };
                    }
                }
                Ok(())
            }
            other => {
                self.view = other;
                Err(self.not_available("submit"))
            }
        }
    }

    pub fn confirm_retire(&mut self) -> Result<(), NavigatorError> {
        let code = match &self.view {
            View::ConfirmRetire { target, .. } => target.code.clone(),
            _ => return Err(self.not_available("confirm retire")),
        };
        match self.registry.retire(&code) {
            Ok(retired) => {
                self.raise(
                    BannerKind::Success,
                    format!("Status {} retired", retired.code),
                );
                self.go(View::RetireSuccess { retired });
            }
            Err(e) => {
                let message = e.user_message();
                self.raise(BannerKind::Error, message.clone());
                if let View::ConfirmRetire { error, .. } = &mut self.view {
                    *error = Some(message);
                }
            }
        }
        Ok(())
    }

    /// Back out of a form, or decline a pending retirement.
    pub fn cancel(&mut self) -> Result<(), NavigatorError> {
        match self.view.kind() {
            ViewKind::AddForm | ViewKind::EditForm => {
                self.go(View::List);
                Ok(())
            }
            ViewKind::ConfirmRetire => {
                self.raise(
                    BannerKind::Warning,
                    "Operation cancelled. The status was not retired".into(),
                );
                self.go(View::RetireCancelled);
                Ok(())
            }
            ViewKind::List
            | ViewKind::AddSuccess
            | ViewKind::EditSuccess
            | ViewKind::RetireSuccess
            | ViewKind::RetireCancelled => Err(self.not_available("cancel")),
        }
    }

    /// Leave a result view and return to the list.
    pub fn acknowledge(&mut self) -> Result<(), NavigatorError> {
        match self.view.kind() {
            ViewKind::AddSuccess
            | ViewKind::EditSuccess
            | ViewKind::RetireSuccess
            | ViewKind::RetireCancelled => {
                self.go(View::List);
                Ok(())
            }
            ViewKind::List
            | ViewKind::AddForm
            | ViewKind::EditForm
            | ViewKind::ConfirmRetire => Err(self.not_available("acknowledge")),
        }
    }
}
