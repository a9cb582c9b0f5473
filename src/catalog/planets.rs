//! Stock solar system data

use super::{BodyCategory, PatternKind, PlanetDescriptor, Rgb};

pub const SOLAR_SYSTEM: [PlanetDescriptor; 9] = [
    PlanetDescriptor {
        id: "sun",
        name: "Sun",
        size: 12.0,
        distance: 0.0,
        angular_speed: 0.001,
        color: Rgb::from_hex(0xffaa00),
        pattern: PatternKind::Lava,
        emissive: true,
        category: BodyCategory::Star,
        description: "The Sun is the star at the centre of our solar system. It is a nearly \
            perfect sphere of hot plasma, heated to incandescence by nuclear fusion in its core.",
        aliases: &["sol"],
    },
    PlanetDescriptor {
        id: "mercury",
        name: "Mercury",
        size: 2.8,
        distance: 30.0,
        angular_speed: 0.008,
        color: Rgb::from_hex(0x8a8a8a),
        pattern: PatternKind::Craters,
        emissive: false,
        category: BodyCategory::Terrestrial,
        description: "Mercury is the smallest planet and the closest to the Sun. Its surface is \
            covered in craters, much like our Moon, because it has no significant atmosphere.",
        aliases: &["mercurio"],
    },
    PlanetDescriptor {
        id: "venus",
        name: "Venus",
        size: 4.0,
        distance: 45.0,
        angular_speed: 0.006,
        color: Rgb::from_hex(0xe39e1c),
        pattern: PatternKind::Craters,
        emissive: false,
        category: BodyCategory::Terrestrial,
        description: "Venus is the second planet from the Sun and the hottest in the solar \
            system. Its dense carbon dioxide atmosphere drives a runaway greenhouse effect.",
        aliases: &[],
    },
    PlanetDescriptor {
        id: "earth",
        name: "Earth",
        size: 4.2,
        distance: 60.0,
        angular_speed: 0.004,
        color: Rgb::from_hex(0x6b93d6),
        pattern: PatternKind::Craters,
        emissive: false,
        category: BodyCategory::Terrestrial,
        description: "Earth is our home and the only planet known to harbour life. About 70% of \
            its surface is water, under an atmosphere rich in nitrogen and oxygen.",
        aliases: &["tierra"],
    },
    PlanetDescriptor {
        id: "mars",
        name: "Mars",
        size: 3.5,
        distance: 75.0,
        angular_speed: 0.003,
        color: Rgb::from_hex(0xc1440e),
        pattern: PatternKind::Craters,
        emissive: false,
        category: BodyCategory::Terrestrial,
        description: "Mars, the Red Planet, has a cold and dusty surface with giant volcanoes \
            and deep canyons.",
        aliases: &["marte"],
    },
    PlanetDescriptor {
        id: "jupiter",
        name: "Jupiter",
        size: 8.0,
        distance: 95.0,
        angular_speed: 0.0015,
        color: Rgb::from_hex(0xc9a688),
        pattern: PatternKind::Gas,
        emissive: false,
        category: BodyCategory::GasGiant,
        description: "Jupiter is the largest planet in our solar system, a gas giant whose \
            atmosphere is mostly hydrogen and helium.",
        aliases: &["júpiter"],
    },
    PlanetDescriptor {
        id: "saturn",
        name: "Saturn",
        size: 7.0,
        distance: 120.0,
        angular_speed: 0.001,
        color: Rgb::from_hex(0xe3d9b6),
        pattern: PatternKind::Gas,
        emissive: false,
        category: BodyCategory::GasGiant,
        description: "Saturn is famous for its rings of ice and rock particles. It is the sixth \
            planet from the Sun and the second largest.",
        aliases: &["saturno"],
    },
    PlanetDescriptor {
        id: "uranus",
        name: "Uranus",
        size: 6.0,
        distance: 145.0,
        angular_speed: 0.0008,
        color: Rgb::from_hex(0x7ec4cf),
        pattern: PatternKind::Ice,
        emissive: false,
        category: BodyCategory::IceGiant,
        description: "Uranus spins on its side. It is an ice giant with an atmosphere made mostly \
            of hydrogen, helium and methane.",
        aliases: &["urano"],
    },
    PlanetDescriptor {
        id: "neptune",
        name: "Neptune",
        size: 5.8,
        distance: 170.0,
        angular_speed: 0.0006,
        color: Rgb::from_hex(0x3b66d9),
        pattern: PatternKind::Ice,
        emissive: false,
        category: BodyCategory::IceGiant,
        description: "Neptune is the farthest planet from the Sun, a cold dark world swept by the \
            strongest winds in the solar system, reaching 2,100 km/h.",
        aliases: &["neptuno"],
    },
];
