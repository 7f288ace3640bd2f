fn main() -> anyhow::Result<()> {
    sagitta::print_engine_info();
    sagitta::print_binary_info();

    let mut engine = sagitta::engine::Engine::new();
    engine.uci_loop(&mut std::io::stdin().lock())
}
