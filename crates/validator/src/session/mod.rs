// Path: crates/validator/src/session/mod.rs
//! The signing orchestrator.
//!
//! A `SigningSession` owns everything derived from one hex input and one
//! wallet connection: the decoded transaction, the vote records, the check
//! results, the acknowledgements and finally the witness. Any new input,
//! connection or disconnection starts a new cycle with a fresh [`Generation`]
//! and drops the previous cycle wholesale.
//!
//! The two suspending operations, anchor checks and wallet signing, are split
//! into jobs. A job carries the generation it was created under, runs without
//! borrowing the session, and its result is only applied if that generation is
//! still current. Results from a superseded cycle are discarded.

mod disclosure;

pub use disclosure::{Disclosure, DisclosureKind};

use crate::aggregate::ValidationAggregate;
use crate::anchor::AnchorVerifier;
use futures_util::future::join_all;
use std::fmt;
use vigil_api::fetch::DocumentFetcher;
use vigil_api::wallet::WalletConnector;
use vigil_telemetry::metrics;
use vigil_tx::{
    decode, serialize, validate_witness, Address, DecodedTransaction, ExplorerLinks, RuleContext,
    RuleEngine, VoteExtractor,
};
use vigil_types::app::{Anchor, Hash28, NetworkId, VoteRecord, Witness, WitnessFile};
use vigil_types::config::InspectorConfig;
use vigil_types::error::{ErrorCode, SessionError, WalletError};

/// Identifies one validation cycle. Strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the session is in the signing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for input to be checked.
    Idle,
    /// Parsing the hex input.
    Decoding,
    /// Rules evaluated; anchor checks outstanding.
    Validating,
    /// All checks reported; waiting for the signer to acknowledge and sign.
    AwaitingAcknowledgement,
    /// The wallet has been asked to sign.
    Signing,
    /// A validated witness is available.
    Signed,
    /// The last operation failed with this message.
    Error(String),
}

impl Phase {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Decoding => "decoding",
            Self::Validating => "validating",
            Self::AwaitingAcknowledgement => "awaiting acknowledgement",
            Self::Signing => "signing",
            Self::Signed => "signed",
            Self::Error(_) => "in error",
        }
    }
}

/// Whether an async result was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The result belonged to the current cycle and was applied.
    Applied,
    /// The result belonged to a superseded cycle and was dropped.
    Discarded,
}

/// What the connected wallet resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletContext {
    /// The wallet's network.
    pub network: NetworkId,
    /// The stake credential of the change address, used as the voting key.
    pub stake_credential: Hash28,
    /// The change address itself.
    pub change_address: Address,
}

impl WalletContext {
    /// Asks `wallet` for its network and change address.
    ///
    /// A change address without a stake part cannot vote and fails the connection.
    pub async fn resolve<W: WalletConnector + ?Sized>(wallet: &W) -> Result<Self, WalletError> {
        let network = NetworkId::try_from(wallet.network_id().await?)?;
        let change_address = Address::parse(&wallet.change_address().await?)?;
        let stake_credential = change_address.stake_credential()?;
        Ok(Self {
            network,
            stake_credential,
            change_address,
        })
    }

    fn rule_context(&self) -> RuleContext {
        RuleContext::connected(self.network, self.stake_credential)
    }
}

/// A pending anchor check for vote `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCheckJob {
    generation: Generation,
    index: usize,
    anchor: Anchor,
}

impl AnchorCheckJob {
    /// The vote this check belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The anchor to verify.
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Runs the check. Never fails: an unverifiable anchor is `false`.
    pub async fn run<F: DocumentFetcher>(self, verifier: &AnchorVerifier<F>) -> AnchorCheckResult {
        let valid = verifier.verify_anchor(&self.anchor).await;
        AnchorCheckResult {
            generation: self.generation,
            index: self.index,
            valid,
        }
    }
}

/// The result of an [`AnchorCheckJob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCheckResult {
    generation: Generation,
    index: usize,
    /// Whether the document matched its committed hash.
    pub valid: bool,
}

/// A signing request approved by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningJob {
    generation: Generation,
    unsigned_hex: String,
    expected_key_hash: Hash28,
}

impl SigningJob {
    /// The exact hex handed to the wallet.
    pub fn unsigned_hex(&self) -> &str {
        &self.unsigned_hex
    }

    /// Asks the wallet for a partial signature.
    pub async fn run<W: WalletConnector + ?Sized>(self, wallet: &W) -> SigningResult {
        let signed = wallet.sign_transaction(&self.unsigned_hex, true).await;
        SigningResult { job: self, signed }
    }
}

/// The wallet's answer to a [`SigningJob`].
#[derive(Debug, Clone)]
pub struct SigningResult {
    job: SigningJob,
    signed: Result<String, WalletError>,
}

/// Everything derived from one decoded transaction.
#[derive(Debug, Clone)]
struct Cycle {
    tx: DecodedTransaction,
    records: Vec<VoteRecord>,
    checks: ValidationAggregate,
    disclosures: Vec<Disclosure>,
    acknowledgements: Vec<bool>,
    witness: Option<Witness>,
}

/// Drives one council member through check, acknowledge and sign.
#[derive(Debug, Clone)]
pub struct SigningSession {
    engine: RuleEngine,
    extractor: VoteExtractor,
    generation: Generation,
    phase: Phase,
    input: String,
    wallet: Option<WalletContext>,
    cycle: Option<Cycle>,
    signing_retryable: bool,
}

impl SigningSession {
    /// Creates an idle session with the rule engine and explorer taken from `config`.
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            engine: RuleEngine::new(config.committee.clone(), config.vote_policy),
            extractor: VoteExtractor::new(ExplorerLinks::new(config.explorer.clone())),
            generation: Generation::default(),
            phase: Phase::Idle,
            input: String::new(),
            wallet: None,
            cycle: None,
            signing_retryable: false,
        }
    }

    // --- Accessors ---

    /// The current cycle.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The raw input, kept across failures so it can be corrected.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The connected wallet, if any.
    pub fn wallet(&self) -> Option<&WalletContext> {
        self.wallet.as_ref()
    }

    /// The decoded transaction of the current cycle.
    pub fn transaction(&self) -> Option<&DecodedTransaction> {
        self.cycle.as_ref().map(|c| &c.tx)
    }

    /// The vote records of the current cycle, in vote order.
    pub fn vote_records(&self) -> &[VoteRecord] {
        self.cycle.as_ref().map_or(&[], |c| &c.records)
    }

    /// The check results of the current cycle.
    pub fn validation(&self) -> Option<&ValidationAggregate> {
        self.cycle.as_ref().map(|c| &c.checks)
    }

    /// The validated witness, once signed.
    pub fn witness(&self) -> Option<&Witness> {
        self.cycle.as_ref().and_then(|c| c.witness.as_ref())
    }

    /// The details to acknowledge.
    pub fn disclosures(&self) -> &[Disclosure] {
        self.cycle.as_ref().map_or(&[], |c| &c.disclosures)
    }

    /// True once every disclosure is acknowledged.
    pub fn is_acknowledged(&self) -> bool {
        self.cycle
            .as_ref()
            .is_some_and(|c| !c.acknowledgements.is_empty() && c.acknowledgements.iter().all(|a| *a))
    }

    // --- Cycle management ---

    fn transition(&mut self, next: Phase) {
        tracing::debug!(
            target: "session",
            generation = %self.generation,
            from = self.phase.name(),
            to = next.name(),
            "phase transition"
        );
        self.phase = next;
    }

    /// Starts a new cycle: every derived value is dropped and in-flight jobs go stale.
    fn reset(&mut self) {
        self.generation = self.generation.next();
        self.cycle = None;
        self.signing_retryable = false;
        self.transition(Phase::Idle);
    }

    /// Ends the cycle with a fatal error, keeping only the raw input.
    fn fail(&mut self, err: SessionError) -> SessionError {
        metrics().inc_error("session", err.code());
        tracing::warn!(target: "session", generation = %self.generation, error = %err, "cycle failed");
        self.cycle = None;
        self.signing_retryable = false;
        self.transition(Phase::Error(err.to_string()));
        err
    }

    /// Connects a wallet and resolves its context. Starts a new cycle.
    pub async fn connect<W: WalletConnector + ?Sized>(
        &mut self,
        wallet: &W,
    ) -> Result<&WalletContext, SessionError> {
        self.reset();
        self.wallet = None;
        let context = WalletContext::resolve(wallet).await.map_err(|e| {
            tracing::warn!(target: "session", error = %e, "wallet connection failed");
            SessionError::Wallet(e)
        })?;
        tracing::info!(
            target: "session",
            network = %context.network,
            stake_credential = %context.stake_credential,
            "wallet connected"
        );
        Ok(&*self.wallet.insert(context))
    }

    /// Forgets the wallet. Starts a new cycle.
    pub fn disconnect(&mut self) {
        self.wallet = None;
        self.reset();
        tracing::info!(target: "session", "wallet disconnected");
    }

    /// Replaces the input. An empty input is valid and simply clears the session.
    pub fn set_input(&mut self, hex: impl Into<String>) {
        self.input = hex.into();
        self.reset();
    }

    // --- Validation ---

    /// Decodes the input and evaluates every synchronous rule.
    ///
    /// Returns the anchor checks still to run, one per vote. When there are
    /// none the session is already awaiting acknowledgement.
    pub fn check(&mut self) -> Result<Vec<AnchorCheckJob>, SessionError> {
        if self.phase == Phase::Signing {
            return Err(SessionError::InvalidPhase(self.phase.name()));
        }
        self.reset();

        self.transition(Phase::Decoding);
        let tx = match decode(&self.input) {
            Ok(tx) => tx,
            Err(e) => {
                metrics().inc_decode_failures(e.code());
                tracing::info!(target: "session", error = %e, "input rejected by decoder");
                return Err(self.fail(SessionError::InvalidFormat));
            }
        };
        metrics().inc_transactions_decoded(tx.shape.name());

        self.transition(Phase::Validating);
        let cycle = match self.build_cycle(tx) {
            Ok(cycle) => cycle,
            Err(e) => return Err(self.fail(e)),
        };
        let jobs: Vec<AnchorCheckJob> = self.anchor_jobs(&cycle);
        self.cycle = Some(cycle);
        if jobs.is_empty() {
            self.transition(Phase::AwaitingAcknowledgement);
        }
        Ok(jobs)
    }

    fn build_cycle(&self, tx: DecodedTransaction) -> Result<Cycle, SessionError> {
        let ctx = self
            .wallet
            .as_ref()
            .map(WalletContext::rule_context)
            .unwrap_or_default();
        let tx_state = self.engine.evaluate(&tx, &ctx)?;
        for (rule, passed) in tx_state.checks() {
            metrics().inc_rule_outcome(rule, passed);
        }

        let records = if tx.shape.is_vote() {
            self.engine.check_votes(&tx)?;
            self.extractor.extract(&tx)?
        } else {
            Vec::new()
        };
        let icc = match &self.wallet {
            Some(wallet) => self.engine.has_valid_icc_credentials(&tx, wallet.network),
            None => false,
        };
        if tx.shape.is_vote() {
            metrics().inc_rule_outcome("hasICCCredentials", icc);
        }

        let checks = ValidationAggregate::new(tx_state, &vec![icc; records.len()]);
        let disclosures = disclosure::disclosures_for(&tx, &records);
        let acknowledgements = vec![false; disclosures.len()];
        Ok(Cycle {
            tx,
            records,
            checks,
            disclosures,
            acknowledgements,
            witness: None,
        })
    }

    fn anchor_jobs(&self, cycle: &Cycle) -> Vec<AnchorCheckJob> {
        cycle
            .tx
            .body
            .first_voter_votes()
            .map(|v| {
                v.votes
                    .iter()
                    .enumerate()
                    .filter_map(|(index, (_, procedure))| {
                        procedure.anchor.clone().map(|anchor| AnchorCheckJob {
                            generation: self.generation,
                            index,
                            anchor,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Applies an anchor result if it belongs to the current cycle.
    pub fn apply_anchor_result(&mut self, result: AnchorCheckResult) -> JobOutcome {
        let current = result.generation == self.generation;
        let Some(cycle) = self.cycle.as_mut().filter(|_| current) else {
            metrics().inc_stale_results_discarded("anchor_check");
            tracing::debug!(
                target: "session",
                result_generation = %result.generation,
                current_generation = %self.generation,
                "discarding stale anchor result"
            );
            return JobOutcome::Discarded;
        };
        if !cycle.checks.record_anchor(result.index, result.valid) {
            return JobOutcome::Discarded;
        }
        if cycle.checks.is_complete() && self.phase == Phase::Validating {
            self.transition(Phase::AwaitingAcknowledgement);
        }
        JobOutcome::Applied
    }

    /// Runs [`check`](Self::check) and every anchor check to completion.
    pub async fn validate<F: DocumentFetcher>(
        &mut self,
        verifier: &AnchorVerifier<F>,
    ) -> Result<(), SessionError> {
        let jobs = self.check()?;
        let results = join_all(jobs.into_iter().map(|job| job.run(verifier))).await;
        for result in results {
            self.apply_anchor_result(result);
        }
        Ok(())
    }

    // --- Acknowledgement ---

    fn acknowledgements_mut(&mut self) -> Result<&mut Vec<bool>, SessionError> {
        let open = matches!(self.phase, Phase::Validating | Phase::AwaitingAcknowledgement)
            || (matches!(self.phase, Phase::Error(_)) && self.signing_retryable);
        if !open {
            return Err(SessionError::InvalidPhase(self.phase.name()));
        }
        self.cycle
            .as_mut()
            .map(|c| &mut c.acknowledgements)
            .ok_or(SessionError::NothingToSign)
    }

    /// Sets or clears the checkbox of disclosure `index`.
    pub fn acknowledge(&mut self, index: usize, checked: bool) -> Result<(), SessionError> {
        let acks = self.acknowledgements_mut()?;
        let slot = acks
            .get_mut(index)
            .ok_or(SessionError::UnknownDisclosure(index))?;
        *slot = checked;
        Ok(())
    }

    /// Ticks every checkbox.
    pub fn acknowledge_all(&mut self) -> Result<(), SessionError> {
        self.acknowledgements_mut()?.iter_mut().for_each(|a| *a = true);
        Ok(())
    }

    // --- Signing ---

    /// Applies the signing gate and, if it passes, enters `Signing`.
    pub fn begin_signing(&mut self) -> Result<SigningJob, SessionError> {
        let wallet = self.wallet.as_ref().ok_or(SessionError::NotConnected)?;
        let cycle = self.cycle.as_ref().ok_or(SessionError::NothingToSign)?;
        let ready = self.phase == Phase::AwaitingAcknowledgement
            || (matches!(self.phase, Phase::Error(_)) && self.signing_retryable);
        if !ready {
            return Err(SessionError::InvalidPhase(self.phase.name()));
        }
        cycle
            .checks
            .gate(cycle.tx.shape.is_vote(), self.is_acknowledged())
            .map_err(|e| {
                metrics().inc_signing_outcome("blocked");
                tracing::info!(target: "session", error = %e, "signing blocked");
                e
            })?;

        let job = SigningJob {
            generation: self.generation,
            unsigned_hex: serialize(&cycle.tx),
            expected_key_hash: wallet.stake_credential,
        };
        self.transition(Phase::Signing);
        Ok(job)
    }

    /// Validates the wallet's answer and, if it holds, enters `Signed`.
    ///
    /// A signing failure leaves the cycle intact so the signer can retry.
    pub fn complete_signing(&mut self, result: SigningResult) -> Result<JobOutcome, SessionError> {
        if result.job.generation != self.generation || self.phase != Phase::Signing {
            metrics().inc_stale_results_discarded("signing");
            tracing::debug!(
                target: "session",
                result_generation = %result.job.generation,
                current_generation = %self.generation,
                "discarding stale signing result"
            );
            return Ok(JobOutcome::Discarded);
        }

        let witness = result
            .signed
            .map_err(SessionError::Wallet)
            .and_then(|signed| {
                validate_witness(&signed, &result.job.unsigned_hex, &result.job.expected_key_hash)
                    .map_err(SessionError::Witness)
            });
        let witness = match witness {
            Ok(witness) => witness,
            Err(e) => {
                metrics().inc_signing_outcome("failed");
                metrics().inc_error("session", e.code());
                tracing::warn!(target: "session", error = %e, "signing failed");
                self.signing_retryable = true;
                self.transition(Phase::Error(e.to_string()));
                return Err(e);
            }
        };
        let cycle = self.cycle.as_mut().ok_or(SessionError::NothingToSign)?;
        cycle.witness = Some(witness);
        self.signing_retryable = false;
        metrics().inc_signing_outcome("signed");
        self.transition(Phase::Signed);
        Ok(JobOutcome::Applied)
    }

    /// Runs the whole signing step against `wallet`.
    pub async fn sign<W: WalletConnector + ?Sized>(
        &mut self,
        wallet: &W,
    ) -> Result<&Witness, SessionError> {
        let job = self.begin_signing()?;
        let result = job.run(wallet).await;
        self.complete_signing(result)?;
        self.witness().ok_or(SessionError::NotSigned)
    }

    /// Builds the witness export for the signed transaction.
    ///
    /// Vote transactions are labelled with the first vote's governance action;
    /// other transactions with their transaction hash.
    pub fn export_witness(&self) -> Result<WitnessFile, SessionError> {
        let cycle = self.cycle.as_ref().ok_or(SessionError::NotSigned)?;
        let witness = cycle.witness.as_ref().ok_or(SessionError::NotSigned)?;
        let label = cycle
            .records
            .first()
            .map(|r| r.governance_action_id.clone())
            .unwrap_or_else(|| cycle.tx.hash().to_hex());
        Ok(WitnessFile::new(label, witness))
    }
}
