fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use a vendored protoc when none is configured in the environment
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    // Client stubs only; the arena server lives elsewhere
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(
            &["proto/unary_arena.proto", "proto/stream_arena.proto"],
            &["proto"],
        )?;
    Ok(())
}
