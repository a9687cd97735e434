use super::population::Population;
use crate::DICE;
use crate::Points;
use crate::config::Rules;
use crate::graph::Graph;
use crate::strategy::PartialStrategy;
use crate::strategy::Strategy;
use anyhow::Context;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// A population frozen between generations.
///
/// Binary layout, big-endian: magic, version, generation, the three rule
/// parameters, then genome, state, and slot counts. Each genome follows
/// as its states in index order, each state as six cutoffs and one move
/// index per graph slot. A footer closes the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    generation: usize,
    rules: Rules,
    population: Population,
}

impl Checkpoint {
    const MAGIC: &'static [u8; 6] = b"KOSTKY";
    const VERSION: u16 = 1;
    const FOOTER: u16 = 0xFFFF;
    const EXTENSION: &'static str = "kostky";

    pub fn generation(&self) -> usize {
        self.generation
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn population(&self) -> &Population {
        &self.population
    }
    pub fn into_population(self) -> Population {
        self.population
    }

    /// `<dir>/gen-<generation>.kostky`
    pub fn path(dir: &Path, generation: usize) -> PathBuf {
        dir.join(format!("gen-{}.{}", generation, Self::EXTENSION))
    }

    pub fn save(dir: &Path, generation: usize, population: &Population) -> anyhow::Result<PathBuf> {
        let path = Self::path(dir, generation);
        log::info!("{:<32}{:<32}", "saving      checkpoint", path.display());
        std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;
        let ref mut writer = std::io::BufWriter::new(file);
        Self::encode(writer, generation, population)
            .with_context(|| format!("write {}", path.display()))?;
        writer.flush().with_context(|| format!("flush {}", path.display()))?;
        Ok(path)
    }

    pub fn load(path: &Path, graph: &Graph) -> anyhow::Result<Self> {
        log::info!("{:<32}{:<32}", "loading     checkpoint", path.display());
        let file = std::fs::File::open(path)
            .with_context(|| format!("open {}", path.display()))?;
        let ref mut reader = std::io::BufReader::new(file);
        Self::decode(reader, graph).with_context(|| format!("read {}", path.display()))
    }

    pub fn encode<W: Write>(
        writer: &mut W,
        generation: usize,
        population: &Population,
    ) -> anyhow::Result<()> {
        let rules = population.rules().context("cannot checkpoint an empty population")?;
        let slots = population.genomes()[0].partials()[0].play().len();
        writer.write_all(Self::MAGIC)?;
        writer.write_u16::<BE>(Self::VERSION)?;
        writer.write_u32::<BE>(generation as u32)?;
        writer.write_u32::<BE>(rules.limit)?;
        writer.write_u32::<BE>(rules.step)?;
        writer.write_u32::<BE>(rules.levels as u32)?;
        writer.write_u32::<BE>(population.size() as u32)?;
        writer.write_u32::<BE>(rules.states() as u32)?;
        writer.write_u32::<BE>(slots as u32)?;
        for genome in population.genomes() {
            for partial in genome.partials() {
                for &cutoff in partial.cutoffs() {
                    writer.write_u32::<BE>(cutoff)?;
                }
                writer.write_all(partial.play())?;
            }
        }
        writer.write_u16::<BE>(Self::FOOTER)?;
        Ok(())
    }

    pub fn decode<R: Read>(reader: &mut R, graph: &Graph) -> anyhow::Result<Self> {
        let ref mut magic = [0u8; 6];
        reader.read_exact(magic).context("read magic")?;
        anyhow::ensure!(*magic == *Self::MAGIC, "not a checkpoint");
        let version = reader.read_u16::<BE>().context("read version")?;
        anyhow::ensure!(version == Self::VERSION, "unsupported version {}", version);
        let generation = reader.read_u32::<BE>().context("read generation")? as usize;
        let rules = Rules {
            limit: reader.read_u32::<BE>().context("read limit")?,
            step: reader.read_u32::<BE>().context("read step")?,
            levels: reader.read_u32::<BE>().context("read levels")? as usize,
        };
        rules.validate().context("checkpoint rules")?;
        let genomes = reader.read_u32::<BE>().context("read genome count")? as usize;
        let states = reader.read_u32::<BE>().context("read state count")? as usize;
        let slots = reader.read_u32::<BE>().context("read slot count")? as usize;
        anyhow::ensure!(
            states == rules.states(),
            "{} states stored, rules need {}",
            states,
            rules.states()
        );
        anyhow::ensure!(
            slots == graph.slots(),
            "{} slots stored, graph has {}",
            slots,
            graph.slots()
        );
        let mut population = Vec::new();
        for g in 0..genomes {
            let mut partials = Vec::with_capacity(states);
            for s in 0..states {
                let partial = Self::partial(reader, graph, &rules)
                    .with_context(|| format!("genome {} state {}", g, s))?;
                partials.push(partial);
            }
            population.push(Strategy::from((rules, partials)));
        }
        let footer = reader.read_u16::<BE>().context("read footer")?;
        anyhow::ensure!(footer == Self::FOOTER, "bad footer {:#06x}", footer);
        Ok(Self {
            generation,
            rules,
            population: Population::from(population),
        })
    }

    fn partial<R: Read>(
        reader: &mut R,
        graph: &Graph,
        rules: &Rules,
    ) -> anyhow::Result<PartialStrategy> {
        let mut cutoffs = [0 as Points; DICE];
        for cutoff in cutoffs.iter_mut() {
            *cutoff = reader.read_u32::<BE>()?;
            anyhow::ensure!(
                rules.range().contains(&*cutoff),
                "cutoff {} outside {:?}",
                cutoff,
                rules.range()
            );
        }
        let mut play = vec![0u8; graph.slots()];
        reader.read_exact(&mut play)?;
        for (slot, &choice) in play.iter().enumerate() {
            let n = graph.slot(slot).moves().len();
            anyhow::ensure!(
                (choice as usize) < n,
                "slot {} plays move {} of {}",
                slot,
                choice,
                n
            );
        }
        Ok(PartialStrategy::from((play, cutoffs)))
    }
}
