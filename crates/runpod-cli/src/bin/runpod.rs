fn main() -> std::process::ExitCode {
    runpod_cli::cli::cli_main()
}
