//! Conversions between wire messages and domain types

use arena_proto::stream::{battle_request, battle_response, BattleRequest, BattleResponse};
use arena_proto::stream::{Handshake, Move as MoveMessage};
use arena_proto::unary::{CheckRoundResultResponse, RegisterRequest, RegisterResponse};

use crate::error::ClientError;
use crate::model::{
    ClientMessage, Identity, MatchStatus, Registration, RoundCheck, RoundResult, ServerEvent,
};

/// Rounds are positive on the wire; zero or negative means "not set".
fn optional_round(value: i32) -> Option<u32> {
    u32::try_from(value).ok().filter(|round| *round > 0)
}

pub(crate) fn round_to_wire(round: u32) -> Result<i32, ClientError> {
    i32::try_from(round)
        .map_err(|_| ClientError::InvalidData(format!("round {} does not fit the wire", round)))
}

pub(crate) fn convert_identity_to_register(identity: &Identity) -> RegisterRequest {
    RegisterRequest {
        language_name: identity.language_name.clone(),
        prng_algorithm: identity.prng_algorithm.clone(),
    }
}

pub(crate) fn convert_registration(response: RegisterResponse) -> Registration {
    Registration {
        status: MatchStatus::parse(&response.status),
        opponent_name: Some(response.opponent_name).filter(|name| !name.is_empty()),
        match_id: response.match_id,
    }
}

pub(crate) fn convert_round_check(response: CheckRoundResultResponse) -> RoundCheck {
    RoundCheck {
        status: MatchStatus::parse(&response.status),
        outcome: response.outcome,
    }
}

pub(crate) fn convert_client_message(message: ClientMessage) -> BattleRequest {
    let payload = match message {
        ClientMessage::Handshake(identity) => battle_request::Payload::Handshake(Handshake {
            language_name: identity.language_name,
            prng_algorithm: identity.prng_algorithm,
        }),
        ClientMessage::Move(mv) => battle_request::Payload::Move(MoveMessage {
            r#move: mv.as_i32(),
        }),
    };
    BattleRequest {
        payload: Some(payload),
    }
}

impl TryFrom<BattleResponse> for ServerEvent {
    type Error = ClientError;

    fn try_from(response: BattleResponse) -> Result<Self, Self::Error> {
        // Payload kinds added to the schema after this client decode as an
        // empty oneof
        let payload = response.payload.ok_or(ClientError::UnknownPayload)?;

        Ok(match payload {
            battle_response::Payload::Status(status) => {
                ServerEvent::Status(MatchStatus::parse(&status))
            }
            battle_response::Payload::Trigger(trigger) => ServerEvent::Trigger {
                round_id: optional_round(trigger.round_id),
            },
            battle_response::Payload::Result(result) => ServerEvent::Result(RoundResult {
                round_id: optional_round(result.round_id),
                outcome: result.outcome,
            }),
        })
    }
}
