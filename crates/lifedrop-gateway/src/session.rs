//! Explicit session context with a defined refresh contract.
//!
//! Session state travels as an owned object handed to callers, not as
//! ambient shared state. The refresh contract: calls inside the debounce
//! window are no-ops, and a refresh observed in flight is not re-entered,
//! so UI event storms cannot hammer the auth backend. Time is always a
//! parameter so the contract is testable without touching a real clock.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

use crate::stores::{AuthGateway, GatewayResult, User};

/// Default debounce window between session refreshes.
pub const DEFAULT_REFRESH_DEBOUNCE_MILLIS: i64 = 1000;

/// What a refresh call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The backend was asked to revalidate the session
    Refreshed,
    /// A refresh landed inside the debounce window; nothing was done
    Debounced,
    /// A refresh was already in flight; nothing was done
    InFlight,
}

/// Session state carrier handed to callers explicitly.
pub struct SessionContext<G> {
    gateway: G,
    debounce: Duration,
    last_refresh: Cell<Option<DateTime<Utc>>>,
    refreshing: Cell<bool>,
}

impl<G: AuthGateway> SessionContext<G> {
    /// Wrap a gateway with the default debounce window.
    pub fn new(gateway: G) -> Self {
        Self::with_debounce(gateway, Duration::milliseconds(DEFAULT_REFRESH_DEBOUNCE_MILLIS))
    }

    /// Wrap a gateway with a custom debounce window.
    pub fn with_debounce(gateway: G, debounce: Duration) -> Self {
        Self {
            gateway,
            debounce,
            last_refresh: Cell::new(None),
            refreshing: Cell::new(false),
        }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.gateway.current_user()
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.gateway.current_user().is_some()
    }

    /// Refresh the session, subject to the debounce/single-flight contract.
    pub fn refresh(&self, now: DateTime<Utc>) -> GatewayResult<RefreshOutcome> {
        if self.refreshing.get() {
            return Ok(RefreshOutcome::InFlight);
        }
        if let Some(last) = self.last_refresh.get() {
            if now - last < self.debounce {
                return Ok(RefreshOutcome::Debounced);
            }
        }

        self.refreshing.set(true);
        // Stamp before the call: a failed refresh still debounces, so an
        // erroring backend is not hammered in a tight loop.
        self.last_refresh.set(Some(now));
        let result = self.gateway.refresh_session();
        self.refreshing.set(false);

        result.map(|()| RefreshOutcome::Refreshed)
    }

    /// Sign in and reset the refresh clock for the new session.
    pub fn sign_in(&self, email: &str, password: &str) -> GatewayResult<User> {
        let user = self.gateway.sign_in(email, password)?;
        self.last_refresh.set(None);
        Ok(user)
    }

    /// Sign out and reset the refresh clock.
    pub fn sign_out(&self) -> GatewayResult<()> {
        self.gateway.sign_out()?;
        self.last_refresh.set(None);
        Ok(())
    }

    /// Access the wrapped gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use chrono::TimeZone;

    /// Gateway that counts refresh calls.
    #[derive(Default)]
    struct CountingGateway {
        refresh_calls: Cell<u32>,
    }

    impl AuthGateway for CountingGateway {
        fn current_user(&self) -> Option<User> {
            None
        }

        fn refresh_session(&self) -> GatewayResult<()> {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            Ok(())
        }

        fn sign_in(&self, _email: &str, _password: &str) -> GatewayResult<User> {
            Ok(User {
                id: "user-1".into(),
                email: "donor@example.com".into(),
            })
        }

        fn sign_out(&self) -> GatewayResult<()> {
            Ok(())
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_refresh_inside_debounce_window_is_noop() {
        let ctx = SessionContext::new(CountingGateway::default());

        assert_eq!(ctx.refresh(at(0)).unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(ctx.refresh(at(0)).unwrap(), RefreshOutcome::Debounced);
        assert_eq!(ctx.gateway().refresh_calls.get(), 1);

        // Past the window the next call goes through
        assert_eq!(ctx.refresh(at(2)).unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(ctx.gateway().refresh_calls.get(), 2);
    }

    #[test]
    fn test_custom_debounce_window() {
        let ctx = SessionContext::with_debounce(
            CountingGateway::default(),
            Duration::milliseconds(5000),
        );

        assert_eq!(ctx.refresh(at(0)).unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(ctx.refresh(at(2)).unwrap(), RefreshOutcome::Debounced);
        assert_eq!(ctx.refresh(at(5)).unwrap(), RefreshOutcome::Refreshed);
    }

    #[test]
    fn test_sign_in_resets_refresh_clock() {
        let ctx = SessionContext::new(CountingGateway::default());

        assert_eq!(ctx.refresh(at(0)).unwrap(), RefreshOutcome::Refreshed);
        ctx.sign_in("donor@example.com", "secret").unwrap();
        // Immediately after sign-in a refresh is allowed again
        assert_eq!(ctx.refresh(at(0)).unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(ctx.gateway().refresh_calls.get(), 2);
    }

    /// Gateway whose refresh re-enters the owning context, as an event
    /// handler firing mid-refresh would.
    #[derive(Default)]
    struct ReentrantGateway {
        ctx: RefCell<Weak<SessionContext<Rc<ReentrantGateway>>>>,
        observed: Cell<Option<RefreshOutcome>>,
        refresh_calls: Cell<u32>,
    }

    impl AuthGateway for Rc<ReentrantGateway> {
        fn current_user(&self) -> Option<User> {
            None
        }

        fn refresh_session(&self) -> GatewayResult<()> {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            if let Some(ctx) = self.ctx.borrow().upgrade() {
                self.observed.set(Some(ctx.refresh(at(0)).unwrap()));
            }
            Ok(())
        }

        fn sign_in(&self, _email: &str, _password: &str) -> GatewayResult<User> {
            Err(crate::stores::GatewayError::InvalidCredentials)
        }

        fn sign_out(&self) -> GatewayResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_refresh_in_flight_is_not_reentered() {
        let gateway = Rc::new(ReentrantGateway::default());
        let ctx = Rc::new(SessionContext::new(gateway.clone()));
        *gateway.ctx.borrow_mut() = Rc::downgrade(&ctx);

        assert_eq!(ctx.refresh(at(0)).unwrap(), RefreshOutcome::Refreshed);
        assert_eq!(gateway.observed.get(), Some(RefreshOutcome::InFlight));
        assert_eq!(gateway.refresh_calls.get(), 1);
    }
}
