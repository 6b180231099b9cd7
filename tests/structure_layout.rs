// tests/structure_layout.rs
use floorplan_compiler::{
    BlockState, BuildConfig, Error, Grid, Instruction, Rgb, StructureCompiler, compile,
};
use glam::IVec3;

const WHITE: Rgb = Rgb::new(255, 255, 255);
const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const CYAN: Rgb = Rgb::new(0, 255, 255);

const CEILING: &str = "minecraft:light_gray_stained_glass";

/// A 5x5 room: walls around the edge, a door on the south side, a light in the middle
/// and a stairwell hole next to it.
fn room() -> Grid {
    Grid::from_fn(5, 5, |x, y| match (x, y) {
        (2, 4) => RED,
        (2, 2) => WHITE,
        (3, 2) => GREEN,
        (0 | 4, _) | (_, 0 | 4) => BLACK,
        _ => Rgb::new(200, 200, 200),
    })
}

fn ceiling_blocks(instructions: &[Instruction]) -> Vec<IVec3> {
    instructions
        .iter()
        .filter(|i| i.material() == CEILING)
        .map(|i| i.bounds().0)
        .collect()
}

#[test]
fn test_light_and_door_example() {
    // 2x1 grid: white then red, floor height 4, door height 2.
    let grid = Grid::from_fn(2, 1, |x, _| if x == 0 { WHITE } else { RED });
    let config = BuildConfig::default();

    let blueprint = compile(&[grid], &config).unwrap();

    let door = config.materials.door.as_str();
    let expected = vec![
        Instruction::set(IVec3::new(0, 0, 0), "minecraft:light_block")
            .with_state(BlockState::Data(15)),
        Instruction::set(IVec3::new(1, 0, 0), door).with_state(BlockState::properties([
            ("half", "lower"),
            ("facing", "north"),
        ])),
        Instruction::set(IVec3::new(1, 1, 0), door).with_state(BlockState::properties([
            ("half", "upper"),
            ("facing", "north"),
        ])),
        Instruction::fill(
            IVec3::new(1, 2, 0),
            IVec3::new(1, 2, 0),
            config.materials.wall.as_str(),
        ),
    ];
    assert_eq!(blueprint.instructions, expected);

    let text = blueprint.to_mcfunction();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Minecraft building generation commands");
    assert_eq!(lines[1], "setblock ~0 ~0 ~0 minecraft:light_block 15");
    assert_eq!(
        lines[2],
        "setblock ~1 ~0 ~0 minecraft:oak_door[half=lower,facing=north]"
    );
    assert_eq!(lines[4], "fill ~1 ~2 ~0 ~1 ~2 ~0 minecraft:black_stained_glass");
}

#[test]
fn test_empty_input() {
    let err = compile(&[], &BuildConfig::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyInput));

    let compiler = StructureCompiler::new(BuildConfig::default()).unwrap();
    assert!(matches!(compiler.compile_parallel(&[]), Err(Error::EmptyInput)));
    assert!(matches!(
        compiler.compile_images::<Vec<u8>>(&[]),
        Err(Error::EmptyInput)
    ));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = BuildConfig::default().with_door_height(4);
    assert!(matches!(
        StructureCompiler::new(config.clone()),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        compile(&[room()], &config),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_compilation_is_deterministic() {
    let config = BuildConfig::default().with_ceiling(true);
    let grids = [room(), room(), room()];

    let first = compile(&grids, &config).unwrap();
    let second = compile(&grids, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_mcfunction(), second.to_mcfunction());
}

#[test]
fn test_parallel_matches_sequential() {
    let compiler = StructureCompiler::new(BuildConfig::default()).unwrap();
    let grids: Vec<Grid> = (0..6).map(|_| room()).collect();

    let sequential = compiler.compile(&grids).unwrap();
    let parallel = compiler.compile_parallel(&grids).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_single_floor_without_ceiling() {
    let blueprint = compile(&[room()], &BuildConfig::default()).unwrap();
    assert!(ceiling_blocks(&blueprint.instructions).is_empty());
    assert_eq!(blueprint.floors[0].ceiling_blocks, 0);

    let roofed = compile(&[room()], &BuildConfig::default().with_ceiling(true)).unwrap();
    assert!(!ceiling_blocks(&roofed.instructions).is_empty());
}

#[test]
fn test_holes_never_get_ceiling() {
    let config = BuildConfig::default().with_ceiling(true);
    let blueprint = compile(&[room()], &config).unwrap();
    let ceiling = ceiling_blocks(&blueprint.instructions);

    // The hole at (3, 2) lies inside the footprint but stays open.
    assert!(!ceiling.contains(&IVec3::new(3, 3, 2)));
    // The light at (2, 2) is not structural but is still roofed.
    assert!(ceiling.contains(&IVec3::new(2, 3, 2)));
    // 25 cells minus the hole.
    assert_eq!(ceiling.len(), 24);
    assert_eq!(blueprint.floors[0].holes, 1);

    // The hole itself is cleared with air below the ceiling.
    assert!(blueprint.instructions.contains(&Instruction::fill(
        IVec3::new(3, 0, 2),
        IVec3::new(3, 2, 2),
        "minecraft:air"
    )));
}

#[test]
fn test_ceiling_bounded_by_structure() {
    // Structure occupies only the middle column; lights outside do not widen the ceiling.
    let grid = Grid::from_fn(3, 3, |x, y| match (x, y) {
        (1, _) => BLACK,
        (0, 0) => WHITE,
        _ => GREEN,
    });
    let blueprint = compile(&[grid], &BuildConfig::default().with_ceiling(true)).unwrap();
    let ceiling = ceiling_blocks(&blueprint.instructions);
    assert_eq!(
        ceiling,
        vec![IVec3::new(1, 3, 0), IVec3::new(1, 3, 1), IVec3::new(1, 3, 2)]
    );

    let footprint = blueprint.floors[0].footprint.unwrap();
    assert_eq!((footprint.min.x, footprint.max.x), (1, 1));
    assert_eq!((footprint.min.y, footprint.max.y), (0, 2));
}

#[test]
fn test_floor_without_structure_has_no_ceiling() {
    let grid = Grid::from_fn(2, 2, |_, _| GREEN);
    let blueprint = compile(&[grid.clone(), grid], &BuildConfig::default()).unwrap();
    assert!(ceiling_blocks(&blueprint.instructions).is_empty());
    assert!(blueprint.floors.iter().all(|f| f.footprint.is_none()));
}

#[test]
fn test_partial_walls_stay_open() {
    let grid = Grid::from_fn(2, 1, |x, _| if x == 0 { CYAN } else { BLACK });
    let blueprint = compile(&[grid.clone(), grid], &BuildConfig::default()).unwrap();
    let ceiling = ceiling_blocks(&blueprint.instructions);
    assert_eq!(ceiling, vec![IVec3::new(1, 3, 0), IVec3::new(1, 7, 0)]);
}

#[test]
fn test_floors_stack_by_height() {
    for floor_height in [4, 5] {
        check_stacking(floor_height);
    }
}

fn check_stacking(floor_height: u32) {
    let config = BuildConfig::default().with_floor_height(floor_height);
    let grids = [room(), swatch(), room()];
    let blueprint = compile(&grids, &config).unwrap();

    assert_eq!(blueprint.floors.len(), 3);
    let mut previous_end = 0;
    for (k, floor) in blueprint.floors.iter().enumerate() {
        let base = k as i32 * floor_height as i32;
        let ceiling_y = base + floor_height as i32 - 1;
        assert_eq!(floor.base_y, base);
        assert_eq!(floor.ceiling_y, ceiling_y);

        // Floors are emitted back to back, in order.
        assert_eq!(floor.instructions.start, previous_end);
        previous_end = floor.instructions.end;

        for instruction in blueprint.floor_instructions(k) {
            let (min, max) = instruction.bounds();
            assert!(min.y >= base, "{instruction} below floor {k}");
            assert!(
                max.y < (k as i32 + 1) * floor_height as i32,
                "{instruction} reaches into floor {}",
                k + 1
            );
            if instruction.material() == CEILING {
                assert_eq!(min.y, ceiling_y);
            }
        }
    }
    assert_eq!(previous_end, blueprint.len());
}

#[test]
fn test_custom_materials_flow_through() {
    let mut config = BuildConfig::default().with_ceiling(true);
    config.materials.wall = "minecraft:stone".into();
    config.materials.ceiling = "minecraft:ochre_froglight".into();

    let grid = Grid::from_fn(1, 1, |_, _| BLACK);
    let blueprint = compile(&[grid], &config).unwrap();
    assert_eq!(
        blueprint.instructions,
        vec![
            Instruction::fill(IVec3::ZERO, IVec3::new(0, 2, 0), "minecraft:stone"),
            Instruction::set(IVec3::new(0, 3, 0), "minecraft:ochre_froglight"),
        ]
    );
}

/// One pixel of every colour, left to right, compiled with the default configuration.
fn swatch() -> Grid {
    let colors = [
        GREEN,
        WHITE,
        Rgb::new(0, 0, 255),
        RED,
        Rgb::new(255, 0, 255),
        Rgb::new(255, 255, 0),
        CYAN,
        Rgb::new(156, 90, 60),
        BLACK,
    ];
    Grid::from_fn(colors.len() as u32, 1, |x, _| colors[x as usize])
}

#[test]
fn test_default_mcfunction_for_every_colour() {
    let wall = "minecraft:black_stained_glass";
    let glass = "minecraft:light_blue_stained_glass";
    let door = "minecraft:oak_door";
    let mut expected = vec![
        "# Minecraft building generation commands".to_string(),
        "fill ~0 ~0 ~0 ~0 ~2 ~0 minecraft:air".to_string(),
        "setblock ~1 ~0 ~0 minecraft:light_block 15".to_string(),
        format!("fill ~2 ~0 ~0 ~2 ~0 ~0 {wall}"),
        format!("fill ~2 ~3 ~0 ~2 ~2 ~0 {wall}"),
        format!("setblock ~2 ~1 ~0 {glass}"),
        format!("setblock ~2 ~2 ~0 {glass}"),
        format!("setblock ~3 ~0 ~0 {door}[half=lower,facing=north]"),
        format!("setblock ~3 ~1 ~0 {door}[half=upper,facing=north]"),
        format!("fill ~3 ~2 ~0 ~3 ~2 ~0 {wall}"),
        format!("fill ~4 ~0 ~0 ~4 ~2 ~0 {wall}"),
        format!("fill ~5 ~0 ~0 ~5 ~1 ~0 {wall}"),
        format!("setblock ~6 ~0 ~0 {wall}"),
        format!("setblock ~7 ~0 ~0 {wall}"),
        format!("fill ~8 ~0 ~0 ~8 ~2 ~0 {wall}"),
    ];

    let text = compile(&[swatch()], &BuildConfig::default())
        .unwrap()
        .to_mcfunction();
    assert_eq!(text.lines().collect::<Vec<_>>(), expected);

    // With a ceiling: columns 2..8 are occupied; purple, yellow and cyan stay open.
    for x in [2, 3, 7, 8] {
        expected.push(format!("setblock ~{x} ~3 ~0 {CEILING}"));
    }
    let text = compile(&[swatch()], &BuildConfig::default().with_ceiling(true))
        .unwrap()
        .to_mcfunction();
    assert_eq!(text.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_stack_beyond_coordinate_range_is_rejected() {
    let config = BuildConfig::default().with_floor_height(i32::MAX as u32);
    assert!(config.validate().is_ok());

    let grid = Grid::from_fn(1, 1, |_, _| BLACK);
    let compiler = StructureCompiler::new(config).unwrap();
    assert!(compiler.compile(std::slice::from_ref(&grid)).is_ok());
    assert!(matches!(
        compiler.compile(&[grid.clone(), grid.clone()]),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        compiler.compile_parallel(&[grid.clone(), grid]),
        Err(Error::InvalidConfiguration(_))
    ));
}
