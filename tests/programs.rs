use chipvm::{display::WIDTH, registers::Reg, Config, Emulator};

fn load(program: &[u16]) -> Emulator {
    let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    let config = Config {
        seed: Some(1),
        ..Config::default()
    };
    Emulator::new(&bytes, &config)
}

fn run(emu: &mut Emulator, steps: usize) {
    for _ in 0..steps {
        emu.step();
    }
}

#[test]
fn draws_zero_glyph_from_font() {
    let mut emu = load(&[0x600A, 0x6105, 0xA000, 0xD015]);
    run(&mut emu, 4);

    let glyph = [0xF0u8, 0x90, 0x90, 0x90, 0xF0];
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8 {
            let expected = (bits >> (7 - col)) & 1;
            assert_eq!(emu.fb.pixel(10 + col, 5 + row), expected, "({col}, {row})");
        }
    }
    let lit = emu.fb.pixels().iter().filter(|&&p| p == 1).count();
    assert_eq!(lit, 4 + 2 + 2 + 2 + 4);
    assert_eq!(emu.regs.get(Reg::VF), 0);
    assert!(emu.fb.draw_requested());
}

#[test]
fn font_glyph_via_point_char() {
    // V1 = 5, I = glyph(V1), draw at (0, 0)
    let mut emu = load(&[0x6105, 0xF129, 0xD005]);
    run(&mut emu, 3);
    assert_eq!(emu.index.0, 25);
    // "5" starts with a full top bar and a left-only second row
    assert_eq!(&emu.fb.pixels()[..4], &[1, 1, 1, 1]);
    assert_eq!(&emu.fb.pixels()[WIDTH..WIDTH + 4], &[1, 0, 0, 0]);
}

#[test]
fn double_draw_collides_and_erases() {
    // one row of 0xFF stored at 0x300, drawn twice at (3, 4)
    let mut emu = load(&[0x60FF, 0xA300, 0xF055, 0x6303, 0x6404, 0xD341, 0xD341]);
    run(&mut emu, 6);
    assert_eq!(emu.regs.get(Reg::VF), 0);
    assert_eq!(emu.fb.pixels().iter().filter(|&&p| p == 1).count(), 8);
    run(&mut emu, 1);
    assert_eq!(emu.regs.get(Reg::VF), 1);
    assert!(emu.fb.pixels().iter().all(|&p| p == 0));
}

#[test]
fn clear_screen_zeroes_everything() {
    let mut emu = load(&[0xA000, 0xD005, 0x00E0]);
    run(&mut emu, 2);
    assert!(emu.fb.take_draw_request());
    run(&mut emu, 1);
    assert!(emu.fb.pixels().iter().all(|&p| p == 0));
    assert!(emu.fb.draw_requested());
}

#[test]
fn call_and_return() {
    // 0x200: call 0x300 ; 0x202: V2 = 1
    let mut program = vec![0x0000u16; 0x81];
    program[0] = 0x2300;
    program[1] = 0x6201;
    program[0x80] = 0x00EE; // at 0x300
    let mut emu = load(&program);

    run(&mut emu, 1);
    assert_eq!(emu.pc.0, 0x300);
    assert_eq!(emu.stack.depth(), 1);
    run(&mut emu, 1);
    assert_eq!(emu.pc.0, 0x202);
    assert_eq!(emu.stack.depth(), 0);
    run(&mut emu, 1);
    assert_eq!(emu.regs.get(Reg::from_nibble(2)), 1);
}

#[test]
fn nested_calls_sixteen_deep() {
    // 0x200..0x21E: each instruction calls the next one, 0x220 returns
    let mut program: Vec<u16> = (1..=16).map(|i| 0x2200 + i * 2).collect();
    program.push(0x00EE);
    let mut emu = load(&program);

    run(&mut emu, 16);
    assert_eq!(emu.pc.0, 0x220);
    assert_eq!(emu.stack.pointer(), 15); // sixteenth push wrapped the pointer
    assert_eq!(emu.stack.depth(), 16);
    run(&mut emu, 1);
    assert_eq!(emu.pc.0, 0x220);
    assert_eq!(emu.stack.depth(), 15);
}

#[test]
fn held_key_needs_release_before_it_resolves_wait() {
    let mut emu = load(&[0xF30A]);
    emu.set_key(0xB, true);
    run(&mut emu, 1);
    emu.set_key(0xB, true);
    assert!(emu.waiting_for_key().is_some());
    emu.set_key(0xB, false);
    emu.set_key(0xB, true);
    assert_eq!(emu.waiting_for_key(), None);
    assert_eq!(emu.regs.get(Reg::from_nibble(3)), 0xB);
}

#[test]
fn wait_for_key_halts_until_press() {
    let mut emu = load(&[0xF50A, 0x7501]);
    run(&mut emu, 1);
    let pc = emu.pc.0;
    run(&mut emu, 10);
    assert_eq!(emu.pc.0, pc);
    assert_eq!(emu.regs.get(Reg::from_nibble(5)), 0);

    emu.set_key(0x7, true);
    assert_eq!(emu.regs.get(Reg::from_nibble(5)), 7);
    // holding the key does not re-resolve anything
    emu.set_key(0x7, true);
    run(&mut emu, 1);
    assert_eq!(emu.regs.get(Reg::from_nibble(5)), 8);
}

#[test]
fn sound_timer_edge_beeps_once() {
    let mut emu = load(&[0x6101, 0xF118]);
    run(&mut emu, 2);
    assert!(!emu.beep_requested());
    emu.tick_timers();
    assert_eq!(emu.sound_timer.count, 0);
    assert!(emu.take_beep());
    emu.tick_timers();
    assert!(!emu.take_beep());
}

#[test]
fn delay_timer_counts_down_per_frame() {
    // DT = 3, then spin
    let mut emu = load(&[0x6103, 0xF115, 0x1204]);
    for expected in [2u8, 1, 0, 0] {
        emu.run_frame();
        assert_eq!(emu.delay_timer.count, expected);
    }
}

#[test]
fn oversize_program_is_truncated() {
    let program = vec![0x12u8; 0x1000];
    let emu = Emulator::new(&program, &Config::default());
    assert_eq!(emu.mem.get(0xFFF), 0x12);
    assert_eq!(emu.mem.get(0x1FF), 0);
}
