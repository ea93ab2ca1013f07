use tokio_util::sync::CancellationToken;

use crate::transport::RequestOptions;

/// Identifies one fetch attempt. Later attempts always carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl core::fmt::Display for RequestToken {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(fmt, "#{}", self.0)
    }
}

/// Handed to the code running one fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub cancel: CancellationToken,
}

impl FetchTicket {
    pub fn options(&self) -> RequestOptions {
        RequestOptions::cancellable(self.cancel.clone())
    }
}

/// Per-view request counter. Of any number of overlapping fetches only the most
/// recently started one is current; starting a fetch cancels the one before it,
/// and dropping the guard cancels whatever is still in flight.
#[derive(Debug, Default)]
pub struct FetchGuard {
    latest: u64,
    in_flight: Option<CancellationToken>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.latest += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        FetchTicket {
            token: RequestToken(self.latest),
            cancel,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest > 0).then_some(RequestToken(self.latest))
    }

    /// Records that the fetch behind `token` finished. Returns whether it is current;
    /// only a current fetch may update view state.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.in_flight = None;
        true
    }

    #[cfg(test)]
    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cancels the in-flight fetch, if any. No-op once it has completed.
    pub fn teardown(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.teardown();
    }
}
