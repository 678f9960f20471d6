// Minimal check that every transition renders over synthetic frames

use frame_transitions::{
    composition::TransitionEngine,
    config::Config,
    frame::{Frame, FrameSequence},
    transitions::{Smoothing, TransitionKind, WipeAxis},
};

fn solid(n: usize, color: [u8; 3]) -> Result<FrameSequence, Box<dyn std::error::Error>> {
    let frame = Frame::filled(160, 120, &color)?;
    Ok(FrameSequence::new(vec![frame; n])?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🎬 Testing Frame-Transitions Core Functionality");

    // Test 1: Frames
    println!("\n1. Building synthetic clips...");
    let red = solid(12, [220, 40, 40])?;
    let blue = solid(12, [40, 40, 220])?;
    println!("   Two clips of {} frames at {:?}", red.len(), red.shape());

    // Test 2: Engine
    println!("\n2. Creating engine...");
    let engine = TransitionEngine::new(Config::default())?;
    println!("   Worker threads: {}", engine.config().processing.threads);

    // Test 3: Every transition
    println!("\n3. Rendering transitions...");
    let kinds = [
        TransitionKind::Cut { pivot: 6 },
        TransitionKind::Dissolve { gamma: 0.0 },
        TransitionKind::Fade { gamma: 0.0, fade_in: true },
        TransitionKind::Fade { gamma: 0.0, fade_in: false },
        TransitionKind::Iris { iris_in: true, smoothing: None },
        TransitionKind::Iris { iris_in: false, smoothing: Some(Smoothing::default()) },
        TransitionKind::Wipe { axis: WipeAxis::Horizontal, reverse: false },
        TransitionKind::Wipe { axis: WipeAxis::Vertical, reverse: true },
    ];

    for kind in &kinds {
        let other = (kind.input_count() == 2).then_some(&blue);
        match engine.render(kind, &red, other) {
            Ok(transition) => {
                let means: Vec<String> = transition
                    .frames()
                    .iter()
                    .map(|f| format!("{:.0}", f.mean()))
                    .collect();
                println!("   ✅ {:<8} {} frames, means [{}]", kind.name(), transition.duration(), means.join(" "));
                assert_eq!(transition.duration(), red.len());
            }
            Err(e) => {
                println!("   ❌ {} failed: {}", kind.name(), e);
                return Err(e.into());
            }
        }
    }

    // Test 4: Save one result
    println!("\n4. Saving a frame...");
    let dissolve = engine.render(&TransitionKind::Dissolve { gamma: 0.0 }, &red, Some(&blue))?;
    match dissolve.frames()[6].save("minimal_test_output.png") {
        Ok(()) => println!("   📁 Output saved to: minimal_test_output.png"),
        Err(e) => println!("   ⚠️  Could not save file: {}", e),
    }

    println!("\n🎉 All transitions rendered.");
    Ok(())
}
