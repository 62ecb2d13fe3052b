//! Cypher run against the concordance graph. Every statement takes the requested
//! id as `$uuid`.

/// One row per concorded node holding `$uuid` as its `prefUUID`, with one entry in
/// `sources` per source node equivalent to it. Related nodes are reported by the
/// `prefUUID` of their own concorded node.
pub const CANONICAL: &str = "
MATCH (canonical:Thing {prefUUID: $uuid})
OPTIONAL MATCH (canonical)<-[:EQUIVALENT_TO]-(source:Thing)
OPTIONAL MATCH (source)-[:HAS_PARENT]->(:Thing)-[:EQUIVALENT_TO]->(parent:Thing)
OPTIONAL MATCH (source)<-[:HAS_PARENT]-(:Thing)-[:EQUIVALENT_TO]->(child:Thing)
WITH canonical, source, parent, child
ORDER BY source.authority, parent.prefUUID, child.prefUUID
WITH canonical, source,
    collect(DISTINCT {id: parent.prefUUID, types: labels(parent), prefLabel: parent.prefLabel}) AS parents,
    collect(DISTINCT {id: child.prefUUID, types: labels(child), prefLabel: child.prefLabel}) AS children
WITH canonical, source, parents, children
ORDER BY source.authority, source.uuid
RETURN canonical.prefUUID AS id,
    canonical.prefLabel AS prefLabel,
    labels(canonical) AS types,
    canonical.descriptionXML AS descriptionXML,
    canonical.strapline AS strapline,
    canonical.imageUrl AS imageUrl,
    collect({authority: source.authority, parents: parents, children: children}) AS sources
";

/// The concorded nodes a source identifier is equivalent to.
pub const SOURCE: &str = "
MATCH (:UPPIdentifier {value: $uuid})-[:IDENTIFIES]->(:Thing)-[:EQUIVALENT_TO]->(canonical:Thing)
RETURN DISTINCT coalesce(canonical.prefUUID, canonical.uuid) AS id,
    canonical.prefUUID IS NOT NULL AS isCanonical
";

pub const CONNECTIVITY: &str = "MATCH (n) RETURN n LIMIT 1";
