//! Print the GraphQL schema definition language for the gateway.

fn main() {
    print!("{}", person_gateway::inbound::graphql::schema_sdl());
}
