//! Build a tiny circuit store, pack it into a .qmb binary in memory, then
//! load and execute it again.
//!
//! Run with: cargo run --example pack_and_run -p qbtm-runner

use qbtm_algebra::Matrix;
use qbtm_core::{Circuit, Object, Prim, Store};
use qbtm_runner::{pack_store, Container, Runner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::new();
    let qubit = Object::quantum(2);

    let id = store.put_circuit(Circuit::new(qubit.clone(), qubit.clone(), Prim::Id))?;
    let entry = store.put_circuit(
        Circuit::new(qubit.clone(), qubit, Prim::Compose).with_children(vec![id, id]),
    )?;

    let payload = pack_store(&store)?;
    let bytes = Container::new(entry, "pack-and-run", "1.0.0", payload).encode()?;
    println!("packed binary: {} bytes", bytes.len());

    let runner = Runner::load(&bytes)?;
    println!("loaded: {} v{}", runner.name(), runner.version());
    println!("entrypoint: {}", runner.entrypoint());

    let output = runner.run(&Matrix::identity(4))?;
    println!(
        "output: {}x{}, trace {}",
        output.rows(),
        output.cols(),
        output.trace()?
    );
    Ok(())
}
