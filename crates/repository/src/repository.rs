use tafweed_core::lifecycle::{self, Decision, ListFilter, VisibilityAction};
use tafweed_core::{
    resolve_end, Clock, CreateDelegationInput, DelegateStatus, Delegation, DelegationPatch,
    DelegationStats, DelegationStatus, Party, PartyVisibility, StatusSummary, SystemClock,
};
use tafweed_storage::KeyValueStore;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::error::RepositoryError;
use crate::identity::Identity;
use crate::seed::seed_delegations;
use crate::DELEGATIONS_KEY;

/// Owns the delegation collection for one session.
///
/// The collection is kept newest first. Every mutation serializes the full
/// collection and writes it under [`DELEGATIONS_KEY`] before the in-memory
/// copy is replaced, so a storage failure leaves both sides unchanged.
#[derive(Debug)]
pub struct DelegationRepository<S, C = SystemClock> {
    store: S,
    clock: C,
    identity: Identity,
    delegations: Vec<Delegation>,
    hydrated: bool,
}

impl<S: KeyValueStore> DelegationRepository<S, SystemClock> {
    /// Open with the system clock and load immediately.
    pub fn open(store: S, identity: Identity) -> Result<Self, RepositoryError> {
        let mut repo = Self::with_clock(store, SystemClock, identity);
        repo.load()?;
        Ok(repo)
    }
}

impl<S: KeyValueStore, C: Clock> DelegationRepository<S, C> {
    /// Construct without touching storage. Call [`load`](Self::load) before
    /// reading; mutations load on demand.
    pub fn with_clock(store: S, clock: C, identity: Identity) -> Self {
        Self {
            store,
            clock,
            identity,
            delegations: Vec::new(),
            hydrated: false,
        }
    }

    // ──────────────────────────────────────────────
    // Loading and persistence
    // ──────────────────────────────────────────────

    /// Restore the collection from storage, installing and persisting the
    /// seed set when nothing is stored. Runs once per repository.
    pub fn load(&mut self) -> Result<&[Delegation], RepositoryError> {
        if self.hydrated {
            return Ok(&self.delegations);
        }
        match self.store.get(DELEGATIONS_KEY)? {
            Some(blob) => {
                let records: Vec<Delegation> =
                    serde_json::from_str(&blob).map_err(|e| RepositoryError::Corrupt {
                        key: DELEGATIONS_KEY.to_string(),
                        message: e.to_string(),
                    })?;
                debug!(count = records.len(), "restored delegation collection");
                self.delegations = records;
            }
            None => {
                let seeds = seed_delegations();
                info!(count = seeds.len(), "no stored collection, installing seed set");
                self.commit(seeds)?;
            }
        }
        self.hydrated = true;
        Ok(&self.delegations)
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    fn commit(&mut self, next: Vec<Delegation>) -> Result<(), RepositoryError> {
        let blob = serde_json::to_string(&next).map_err(|e| RepositoryError::Encode {
            key: DELEGATIONS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(DELEGATIONS_KEY, &blob)?;
        debug!(count = next.len(), bytes = blob.len(), "persisted delegation collection");
        self.delegations = next;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, RepositoryError> {
        self.delegations.iter().position(|d| d.id == id).ok_or_else(|| {
            warn!(id, "delegation not found");
            RepositoryError::NotFound { id: id.to_string() }
        })
    }

    // ──────────────────────────────────────────────
    // Mutations
    // ──────────────────────────────────────────────

    /// Create a pending delegation from `input` and put it at the front.
    pub fn create(&mut self, input: CreateDelegationInput) -> Result<Delegation, RepositoryError> {
        self.load()?;
        input.validate()?;

        let now = self.clock.now();
        let start_at = input.start_at.unwrap_or(now);
        let end_at = resolve_end(input.duration_type, start_at, input.end_at)?;

        let record = Delegation {
            id: self.next_id(now),
            service_id: input.service_id,
            service_name_ar: input.service_name_ar,
            service_name_en: input.service_name_en,
            platform: input.platform,
            is_digital_service: input.is_digital_service,
            grantor_id: self.identity.grantor_id.clone(),
            grantor_name: self.identity.grantor_name.clone(),
            delegate_id: input.delegate_id.trim().to_string(),
            delegate_name: input.delegate_name.trim().to_string(),
            delegate_phone: input.delegate_phone.trim().to_string(),
            duration_type: input.duration_type,
            start_at,
            end_at,
            status: DelegationStatus::Pending,
            delegate_status: DelegateStatus::Pending,
            delegate_accepted_terms: false,
            delegate_accepted_at: None,
            grantor_visibility: PartyVisibility::default(),
            delegate_visibility: PartyVisibility::default(),
            created_at: now,
            updated_at: now,
        };
        record.check_invariants()?;

        let mut next = Vec::with_capacity(self.delegations.len() + 1);
        next.push(record.clone());
        next.extend(self.delegations.iter().cloned());
        self.commit(next)?;

        info!(id = %record.id, service = %record.service_id, "created delegation");
        Ok(record)
    }

    /// `del-<unix millis>`, suffixed `-2`, `-3`, ... if that id is taken.
    fn next_id(&self, now: OffsetDateTime) -> String {
        let base = format!("del-{}", now.unix_timestamp_nanos() / 1_000_000);
        let taken = |id: &str| self.delegations.iter().any(|d| d.id == id);
        if !taken(base.as_str()) {
            return base;
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !taken(candidate.as_str()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Merge `patch` into the record with `id` and refresh `updatedAt`.
    ///
    /// Status changes must follow the lifecycle transition table, closing
    /// statuses wait for the window to end, and the merged record must still
    /// satisfy the record invariants.
    pub fn update(&mut self, id: &str, patch: &DelegationPatch) -> Result<Delegation, RepositoryError> {
        self.load()?;
        let index = self.position(id)?;
        let now = self.clock.now();
        let current = &self.delegations[index];
        lifecycle::check_patch(current, patch, now)?;

        let mut merged = current.clone();
        patch.apply_to(&mut merged);
        merged.updated_at = now;
        merged.check_invariants()?;

        let mut next = self.delegations.clone();
        next[index] = merged.clone();
        self.commit(next)?;
        Ok(merged)
    }

    /// Record the delegate's decision on a pending delegation.
    pub fn decide(&mut self, id: &str, decision: Decision) -> Result<Delegation, RepositoryError> {
        self.load()?;
        let index = self.position(id)?;
        let patch = lifecycle::decide(&self.delegations[index], decision, self.clock.now())?;
        let updated = self.update(id, &patch)?;
        info!(id, status = %updated.status, "delegate decided");
        Ok(updated)
    }

    pub fn accept(&mut self, id: &str, terms_acknowledged: bool) -> Result<Delegation, RepositoryError> {
        self.decide(id, Decision::Accept { terms_acknowledged })
    }

    pub fn reject(&mut self, id: &str) -> Result<Delegation, RepositoryError> {
        self.decide(id, Decision::Reject)
    }

    /// Archive, unarchive or soft-delete the record in one party's view.
    pub fn set_visibility(
        &mut self,
        id: &str,
        party: Party,
        action: VisibilityAction,
    ) -> Result<Delegation, RepositoryError> {
        self.load()?;
        let index = self.position(id)?;
        let patch = lifecycle::visibility_patch(&self.delegations[index], party, action);
        let updated = self.update(id, &patch)?;
        info!(id, %party, ?action, "visibility changed");
        Ok(updated)
    }

    /// Close every window that ended before `now`: pending records expire,
    /// active ones complete. Returns the ids that changed; persists once.
    pub fn sweep_expired(&mut self) -> Result<Vec<String>, RepositoryError> {
        self.load()?;
        let now = self.clock.now();
        let mut next = self.delegations.clone();
        let mut changed = Vec::new();
        for record in next.iter_mut() {
            let Some(patch) = lifecycle::close_window(record, now) else {
                continue;
            };
            lifecycle::check_patch(record, &patch, now)?;
            let from = record.status;
            patch.apply_to(record);
            record.updated_at = now;
            warn!(id = %record.id, %from, to = %record.status, "window closed");
            changed.push(record.id.clone());
        }
        if !changed.is_empty() {
            self.commit(next)?;
            info!(count = changed.len(), "sweep closed delegations");
        }
        Ok(changed)
    }

    // ──────────────────────────────────────────────
    // Queries
    // ──────────────────────────────────────────────

    /// The whole collection, newest first, including soft-deleted records.
    pub fn all(&self) -> &[Delegation] {
        &self.delegations
    }

    pub fn get(&self, id: &str) -> Option<&Delegation> {
        self.delegations.iter().find(|d| d.id == id)
    }

    /// Records granted by `grantor_id` that the grantor has not deleted.
    pub fn query_for_grantor(&self, grantor_id: &str) -> Vec<&Delegation> {
        self.query_for(Party::Grantor, grantor_id)
    }

    /// Records addressed to `delegate_id` that the delegate has not deleted.
    pub fn query_for_delegate(&self, delegate_id: &str) -> Vec<&Delegation> {
        self.query_for(Party::Delegate, delegate_id)
    }

    fn query_for(&self, party: Party, party_id: &str) -> Vec<&Delegation> {
        self.delegations
            .iter()
            .filter(|d| d.party_id(party) == party_id && lifecycle::is_visible_to(d, party))
            .collect()
    }

    /// Records of `party_id` narrowed by a listing view and status.
    pub fn list(&self, party: Party, party_id: &str, filter: ListFilter) -> Vec<&Delegation> {
        self.delegations
            .iter()
            .filter(|d| d.party_id(party) == party_id && filter.matches(d, party))
            .collect()
    }

    pub fn stats(&self) -> DelegationStats {
        DelegationStats::compute(&self.delegations)
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::compute(&self.delegations)
    }

    pub fn latest(&self, n: usize) -> Vec<&Delegation> {
        tafweed_core::latest(&self.delegations, n)
    }

    // ──────────────────────────────────────────────
    // Accessors
    // ──────────────────────────────────────────────

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
