//! Wire contract for the rock/paper/scissors arena, generated from
//! `proto/unary_arena.proto` and `proto/stream_arena.proto`.

pub mod unary {
    tonic::include_proto!("ai.pipestream.tourney.unary.v1");
}

pub mod stream {
    tonic::include_proto!("ai.pipestream.tourney.stream.v1");
}

pub use stream::streaming_arena_service_client::StreamingArenaServiceClient;
pub use unary::unary_arena_service_client::UnaryArenaServiceClient;
