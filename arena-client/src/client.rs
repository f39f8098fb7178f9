//! Arena gRPC client implementation

use crate::converters::{
    convert_client_message, convert_identity_to_register, convert_registration,
    convert_round_check, round_to_wire,
};
use crate::error::{ClientError, ClientResult};
use crate::model::{
    ClientMessage, Identity, MatchStatus, Move, Registration, RoundCheck, ServerEvent,
};
use crate::traits::{BattleArena, BattleChannel, UnaryArena};
use arena_proto::stream::{BattleRequest, BattleResponse};
use arena_proto::unary::{CheckRoundResultRequest, SubmitMoveRequest};
use arena_proto::{StreamingArenaServiceClient, UnaryArenaServiceClient};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::Channel;

/// Outbound messages buffered ahead of the transport. The drivers never have
/// more than one in flight, so this only has to hold the handshake.
const OUTBOUND_BUFFER: usize = 8;

/// Network client for both arena services over one HTTP/2 connection
#[derive(Debug, Clone)]
pub struct GrpcArena {
    unary: UnaryArenaServiceClient<Channel>,
    stream: StreamingArenaServiceClient<Channel>,
}

impl GrpcArena {
    /// Connect to the arena server
    pub async fn connect(addr: &str) -> ClientResult<Self> {
        let channel = Channel::from_shared(addr.to_string())
            .map_err(|e| ClientError::InvalidAddress(e.to_string()))?
            .connect()
            .await?;

        Ok(Self::from_channel(channel))
    }

    /// Build on an already established channel
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            unary: UnaryArenaServiceClient::new(channel.clone()),
            stream: StreamingArenaServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl UnaryArena for GrpcArena {
    async fn register(&mut self, identity: &Identity) -> ClientResult<Registration> {
        let request = convert_identity_to_register(identity);
        let response = self.unary.register(request).await?;
        Ok(convert_registration(response.into_inner()))
    }

    async fn submit_move(
        &mut self,
        match_id: &str,
        round: u32,
        mv: Move,
    ) -> ClientResult<MatchStatus> {
        let request = SubmitMoveRequest {
            match_id: match_id.to_string(),
            round_number: round_to_wire(round)?,
            r#move: mv.as_i32(),
        };

        let response = self.unary.submit_move(request).await?;
        Ok(MatchStatus::parse(&response.into_inner().status))
    }

    async fn check_round_result(
        &mut self,
        match_id: &str,
        round: u32,
    ) -> ClientResult<RoundCheck> {
        let request = CheckRoundResultRequest {
            match_id: match_id.to_string(),
            round_number: round_to_wire(round)?,
        };

        let response = self.unary.check_round_result(request).await?;
        Ok(convert_round_check(response.into_inner()))
    }
}

#[async_trait]
impl BattleArena for GrpcArena {
    type Channel = GrpcBattleChannel;

    async fn open_battle(&mut self, identity: &Identity) -> ClientResult<GrpcBattleChannel> {
        let (outbound, rx) = mpsc::channel(OUTBOUND_BUFFER);
        let handshake = convert_client_message(ClientMessage::Handshake(identity.clone()));
        outbound
            .send(handshake)
            .await
            .map_err(|_| ClientError::ChannelClosed)?;

        let response = self.stream.battle(ReceiverStream::new(rx)).await?;

        Ok(GrpcBattleChannel {
            outbound: Some(outbound),
            inbound: response.into_inner(),
        })
    }
}

/// An open `Battle` stream.
///
/// The send direction is the sender half of an mpsc channel that tonic drains
/// into the request body; dropping the sender ends the request stream.
pub struct GrpcBattleChannel {
    outbound: Option<mpsc::Sender<BattleRequest>>,
    inbound: tonic::Streaming<BattleResponse>,
}

#[async_trait]
impl BattleChannel for GrpcBattleChannel {
    async fn send(&mut self, message: ClientMessage) -> ClientResult<()> {
        let outbound = self.outbound.as_ref().ok_or(ClientError::ChannelClosed)?;
        outbound
            .send(convert_client_message(message))
            .await
            .map_err(|_| ClientError::ChannelClosed)
    }

    async fn recv(&mut self) -> ClientResult<Option<ServerEvent>> {
        while let Some(response) = self.inbound.message().await? {
            if let Some(event) = readable_event(response)? {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn close_send(&mut self) {
        self.outbound.take();
    }
}

/// Decode one battle response. Payload kinds this client does not know are
/// logged and yield `None`; the caller reads on.
fn readable_event(response: BattleResponse) -> ClientResult<Option<ServerEvent>> {
    match ServerEvent::try_from(response) {
        Ok(event) => Ok(Some(event)),
        Err(ClientError::UnknownPayload) => {
            tracing::warn!("Skipping unrecognised battle response");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
