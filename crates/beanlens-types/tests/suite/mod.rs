mod class_store;
