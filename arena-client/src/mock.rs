//! Mock arena transports for testing - only compiled in test mode or with
//! the mock feature

use crate::error::{ClientError, ClientResult};
use crate::model::{
    ClientMessage, Identity, MatchStatus, Move, Registration, RoundCheck, ServerEvent,
};
use crate::moves::MoveSource;
use crate::traits::{BattleArena, BattleChannel, UnaryArena};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type RegisterFn = Box<dyn Fn() -> ClientResult<Registration> + Send>;
type SubmitMoveFn = Box<dyn Fn(u32) -> ClientResult<MatchStatus> + Send>;
type CheckRoundResultFn = Box<dyn FnMut(u32) -> ClientResult<RoundCheck> + Send>;
type ErrorFn = Box<dyn Fn() -> ClientError + Send>;

/// Mock unary arena. Clones share responses and the call log.
#[derive(Clone)]
pub struct MockUnaryArena {
    responses: Arc<Mutex<UnaryResponses>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Default)]
struct UnaryResponses {
    register: Option<RegisterFn>,
    submit_move: Option<SubmitMoveFn>,
    check_round_result: Option<CheckRoundResultFn>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Register {
        language_name: String,
        prng_algorithm: String,
    },
    SubmitMove {
        match_id: String,
        round: u32,
        mv: Move,
    },
    CheckRoundResult {
        match_id: String,
        round: u32,
    },
}

impl Default for MockUnaryArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUnaryArena {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(UnaryResponses::default())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure register response
    pub fn with_register_response<F>(self, f: F) -> Self
    where
        F: Fn() -> ClientResult<Registration> + Send + 'static,
    {
        self.responses.lock().unwrap().register = Some(Box::new(f));
        self
    }

    /// Register always succeeds with this match id and status
    pub fn with_registration(self, match_id: &str, status: MatchStatus) -> Self {
        let match_id = match_id.to_string();
        self.with_register_response(move || {
            Ok(Registration {
                match_id: match_id.clone(),
                status: status.clone(),
                opponent_name: None,
            })
        })
    }

    /// Configure submit_move response, keyed by round number
    pub fn with_submit_move_response<F>(self, f: F) -> Self
    where
        F: Fn(u32) -> ClientResult<MatchStatus> + Send + 'static,
    {
        self.responses.lock().unwrap().submit_move = Some(Box::new(f));
        self
    }

    /// Configure check_round_result response, keyed by round number
    pub fn with_check_round_result_response<F>(self, f: F) -> Self
    where
        F: FnMut(u32) -> ClientResult<RoundCheck> + Send + 'static,
    {
        self.responses.lock().unwrap().check_round_result = Some(Box::new(f));
        self
    }

    /// Every round answers `PENDING` `pending` times, then resolves with
    /// `outcome`
    pub fn with_pending_rounds(self, pending: u32, outcome: &str) -> Self {
        let outcome = outcome.to_string();
        let mut polls: HashMap<u32, u32> = HashMap::new();
        self.with_check_round_result_response(move |round| {
            let seen = polls.entry(round).or_insert(0);
            *seen += 1;
            if *seen <= pending {
                Ok(RoundCheck::pending())
            } else {
                Ok(RoundCheck::resolved(outcome.clone()))
            }
        })
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnaryArena for MockUnaryArena {
    async fn register(&mut self, identity: &Identity) -> ClientResult<Registration> {
        self.call_log.lock().unwrap().push(MockCall::Register {
            language_name: identity.language_name.clone(),
            prng_algorithm: identity.prng_algorithm.clone(),
        });

        let responses = self.responses.lock().unwrap();
        if let Some(ref f) = responses.register {
            f()
        } else {
            Err(ClientError::NotConfigured("register".to_string()))
        }
    }

    async fn submit_move(
        &mut self,
        match_id: &str,
        round: u32,
        mv: Move,
    ) -> ClientResult<MatchStatus> {
        self.call_log.lock().unwrap().push(MockCall::SubmitMove {
            match_id: match_id.to_string(),
            round,
            mv,
        });

        let responses = self.responses.lock().unwrap();
        if let Some(ref f) = responses.submit_move {
            f(round)
        } else {
            Err(ClientError::NotConfigured("submit_move".to_string()))
        }
    }

    async fn check_round_result(
        &mut self,
        match_id: &str,
        round: u32,
    ) -> ClientResult<RoundCheck> {
        self.call_log
            .lock()
            .unwrap()
            .push(MockCall::CheckRoundResult {
                match_id: match_id.to_string(),
                round,
            });

        let mut responses = self.responses.lock().unwrap();
        if let Some(ref mut f) = responses.check_round_result {
            f(round)
        } else {
            Err(ClientError::NotConfigured("check_round_result".to_string()))
        }
    }
}

/// Mock streaming arena: replays a fixed list of server events, then ends
/// the stream.
#[derive(Clone)]
pub struct MockBattleArena {
    script: Arc<Mutex<BattleScript>>,
    call_log: Arc<Mutex<Vec<BattleCall>>>,
}

#[derive(Default)]
struct BattleScript {
    events: VecDeque<ServerEvent>,
    recv_error: Option<(usize, ErrorFn)>,
    open_error: Option<ErrorFn>,
    fail_sends: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleCall {
    /// Stream opened with this handshake identity
    Open(Identity),
    Send(ClientMessage),
    Received(ServerEvent),
    EndOfStream,
    CloseSend,
    /// The channel was dropped
    Released,
}

impl Default for MockBattleArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBattleArena {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(BattleScript::default())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Events delivered in order by `recv`
    pub fn with_events(self, events: Vec<ServerEvent>) -> Self {
        self.script.lock().unwrap().events = events.into();
        self
    }

    /// `recv` fails once `after` events have been delivered
    pub fn with_recv_error_after<F>(self, after: usize, f: F) -> Self
    where
        F: Fn() -> ClientError + Send + 'static,
    {
        self.script.lock().unwrap().recv_error = Some((after, Box::new(f)));
        self
    }

    pub fn with_open_error<F>(self, f: F) -> Self
    where
        F: Fn() -> ClientError + Send + 'static,
    {
        self.script.lock().unwrap().open_error = Some(Box::new(f));
        self
    }

    /// Every `send` fails as if the transport had gone away
    pub fn with_failing_sends(self) -> Self {
        self.script.lock().unwrap().fail_sends = true;
        self
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<BattleCall> {
        self.call_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl BattleArena for MockBattleArena {
    type Channel = MockBattleChannel;

    async fn open_battle(&mut self, identity: &Identity) -> ClientResult<MockBattleChannel> {
        self.call_log
            .lock()
            .unwrap()
            .push(BattleCall::Open(identity.clone()));

        if let Some(ref f) = self.script.lock().unwrap().open_error {
            return Err(f());
        }

        Ok(MockBattleChannel {
            script: self.script.clone(),
            call_log: self.call_log.clone(),
            delivered: 0,
            send_open: true,
        })
    }
}

pub struct MockBattleChannel {
    script: Arc<Mutex<BattleScript>>,
    call_log: Arc<Mutex<Vec<BattleCall>>>,
    delivered: usize,
    send_open: bool,
}

#[async_trait]
impl BattleChannel for MockBattleChannel {
    async fn send(&mut self, message: ClientMessage) -> ClientResult<()> {
        if !self.send_open || self.script.lock().unwrap().fail_sends {
            return Err(ClientError::ChannelClosed);
        }
        self.call_log.lock().unwrap().push(BattleCall::Send(message));
        Ok(())
    }

    async fn recv(&mut self) -> ClientResult<Option<ServerEvent>> {
        let mut script = self.script.lock().unwrap();
        if let Some((after, ref f)) = script.recv_error {
            if self.delivered == after {
                return Err(f());
            }
        }

        match script.events.pop_front() {
            Some(event) => {
                self.delivered += 1;
                self.call_log
                    .lock()
                    .unwrap()
                    .push(BattleCall::Received(event.clone()));
                Ok(Some(event))
            }
            None => {
                self.call_log.lock().unwrap().push(BattleCall::EndOfStream);
                Ok(None)
            }
        }
    }

    fn close_send(&mut self) {
        self.send_open = false;
        self.call_log.lock().unwrap().push(BattleCall::CloseSend);
    }
}

impl Drop for MockBattleChannel {
    fn drop(&mut self) {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(BattleCall::Released);
        }
    }
}

/// Replays a fixed sequence of moves, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedMoveSource {
    moves: Vec<Move>,
    next: usize,
}

impl ScriptedMoveSource {
    pub fn new(moves: Vec<Move>) -> Self {
        assert!(!moves.is_empty(), "scripted move source needs at least one move");
        Self { moves, next: 0 }
    }
}

impl MoveSource for ScriptedMoveSource {
    fn next_move(&mut self) -> Move {
        let mv = self.moves[self.next % self.moves.len()];
        self.next += 1;
        mv
    }
}
