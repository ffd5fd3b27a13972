use super::*;

/// The component graph.
///
/// Components are stored once, in declaration order. The index maps each name to a
/// position in that list. When a name is declared twice, the index keeps the last
/// declaration, but both declarations are still evaluated.
#[derive(Debug)]
pub struct Circuit {
    components: Vec<Component>,
    index: BTreeMap<String, ComponentId>,
    shadowed: Vec<ComponentId>,
}

impl Circuit {
    /// Builds the graph, resolving every input name.
    /// The first input that names an undeclared component fails with [`CircuitError::UnknownComponent`].
    pub fn build(netlist: &Netlist) -> Result<Circuit, CircuitError> {
        Circuit::build_with(netlist, false)
    }

    /// Like [`Circuit::build`], but a name declared twice is an error.
    pub fn build_strict(netlist: &Netlist) -> Result<Circuit, CircuitError> {
        Circuit::build_with(netlist, true)
    }

    fn build_with(netlist: &Netlist, strict: bool) -> Result<Circuit, CircuitError> {
        let mut index: BTreeMap<String, ComponentId> = BTreeMap::new();
        let mut shadowed = vec![];

        for (component_id, decl) in netlist.decls().iter().enumerate() {
            if let Some(previous_id) = index.insert(decl.name.clone(), component_id) {
                if strict {
                    return Err(CircuitError::DuplicateComponent(decl.loc(), decl.name.clone()));
                }
                warn!("Component {} is declared more than once. Lookups now use the declaration at {}", decl.name, decl.loc());
                shadowed.push(previous_id);
            }
        }

        let mut components = Vec::with_capacity(netlist.decls().len());
        for decl in netlist.decls() {
            let gate = decl.gate.try_map(|name| {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| CircuitError::UnknownComponent(decl.loc(), name.clone()))
            })?;
            trace!("    {} : {}", decl.name, decl.gate);

            components.push(Component {
                loc: decl.loc(),
                name: decl.name.clone(),
                gate,
                init: decl.init,
            });
        }

        info!("Built circuit with {} components ({} controlled)", components.len(), components.iter().filter(|c| c.is_controlled()).count());
        Ok(Circuit {
            components,
            index,
            shadowed,
        })
    }

    pub fn resolve(&self, name: &str) -> Result<ComponentId, CircuitError> {
        self.resolve_at(&Loc::unknown(), name)
    }

    /// Resolves a name referenced from `loc`, so failures point back at the reference.
    pub fn resolve_at(&self, loc: &Loc, name: &str) -> Result<ComponentId, CircuitError> {
        match self.index.get(name) {
            Some(component_id) => Ok(*component_id),
            None => Err(CircuitError::UnknownComponent(loc.clone(), name.to_string())),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, component_id: ComponentId) -> &Component {
        &self.components[component_id]
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Names reachable through the index, in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.components
            .iter()
            .enumerate()
            .filter(|(component_id, component)| self.index.get(component.name()) == Some(component_id))
            .map(|(_component_id, component)| component.name())
            .collect()
    }

    /// Names that were declared more than once.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shadowed.iter().map(|component_id| self.components[*component_id].name()).collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn controlled(&self) -> Vec<ComponentId> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_component_id, component)| component.is_controlled())
            .map(|(component_id, _component)| component_id)
            .collect()
    }
}
